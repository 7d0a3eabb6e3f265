//! Trainer configuration

use anyhow::{Context, Result};
use cogsguard_evolution::{EvolutionConfig, GenerationPolicy};
use serde::{Deserialize, Serialize};

/// Training run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Seed for the coordinator and the arena
    pub seed: u64,
    /// Games to play
    pub games: u32,
    /// Agents per game
    pub agents: u32,
    /// Executor steps per game
    pub steps_per_game: u32,
    /// Team score needed to count a game as won
    pub win_threshold: f64,
    pub evolution: EvolutionConfig,
    pub generation: GenerationPolicy,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            games: 200,
            agents: 4,
            steps_per_game: 120,
            win_threshold: 0.5,
            evolution: EvolutionConfig::default(),
            generation: GenerationPolicy::default(),
        }
    }
}

impl TrainerConfig {
    /// Load configuration from `.env` and `COGSGUARD_*` variables
    ///
    /// Unset variables keep their defaults. Set but unparsable variables are
    /// an error.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        override_from_env("COGSGUARD_SEED", &mut cfg.seed)?;
        override_from_env("COGSGUARD_GAMES", &mut cfg.games)?;
        override_from_env("COGSGUARD_AGENTS", &mut cfg.agents)?;
        override_from_env("COGSGUARD_STEPS_PER_GAME", &mut cfg.steps_per_game)?;
        override_from_env("COGSGUARD_WIN_THRESHOLD", &mut cfg.win_threshold)?;

        // Evolution settings
        override_from_env("COGSGUARD_MUTATION_RATE", &mut cfg.evolution.mutation_rate)?;
        override_from_env("COGSGUARD_FITNESS_ALPHA", &mut cfg.evolution.fitness_alpha)?;
        override_from_env(
            "COGSGUARD_LOCK_FITNESS_THRESHOLD",
            &mut cfg.evolution.lock_fitness_threshold,
        )?;
        override_from_env(
            "COGSGUARD_MAX_BEHAVIORS_PER_ROLE",
            &mut cfg.evolution.max_behaviors_per_role,
        )?;

        // Generation settings
        override_from_env(
            "COGSGUARD_GAMES_PER_GENERATION",
            &mut cfg.generation.games_per_generation,
        )?;
        override_from_env(
            "COGSGUARD_OFFSPRING_PER_GENERATION",
            &mut cfg.generation.offspring_per_generation,
        )?;
        override_from_env("COGSGUARD_CREDIT_BEHAVIORS", &mut cfg.generation.credit_behaviors)?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.agents > 0, "agents must be at least 1");
        anyhow::ensure!(self.steps_per_game > 0, "steps_per_game must be at least 1");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.win_threshold),
            "win_threshold must be within [0, 1], got {}",
            self.win_threshold
        );
        self.evolution.validate()?;
        self.generation.validate()?;
        Ok(())
    }
}

fn override_from_env<T>(key: &str, slot: &mut T) -> Result<()>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Ok(val) = std::env::var(key) {
        *slot = val
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {val:?}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = TrainerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.generation.games_per_generation, 10);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut cfg = TrainerConfig::default();
        cfg.agents = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = TrainerConfig::default();
        cfg.evolution.mutation_rate = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        let mut games = 1u32;
        std::env::set_var("COGSGUARD_TEST_GAMES", "17");
        override_from_env("COGSGUARD_TEST_GAMES", &mut games).unwrap();
        assert_eq!(games, 17);

        std::env::set_var("COGSGUARD_TEST_GAMES", "many");
        assert!(override_from_env("COGSGUARD_TEST_GAMES", &mut games).is_err());
        assert_eq!(games, 17);
        std::env::remove_var("COGSGUARD_TEST_GAMES");
    }
}
