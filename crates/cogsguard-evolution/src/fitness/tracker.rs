//! Exponential-moving-average fitness for behaviors and roles
//!
//! The first observation sets fitness directly. Later observations blend in
//! with weight `alpha`. Scores are expected in [0, 1]; clamping is the
//! caller's job.

use tracing::debug;

use crate::behavior::BehaviorUnit;
use crate::role::RoleDefinition;
use crate::EvolutionConfig;

/// Next fitness value given the number of games already observed
#[inline]
pub fn ema_update(fitness: f64, games_before: u32, score: f64, alpha: f64) -> f64 {
    if games_before == 0 {
        score
    } else {
        fitness * (1.0 - alpha) + score * alpha
    }
}

pub fn record_behavior_score<Ctx, Act>(behavior: &mut BehaviorUnit<Ctx, Act>, score: f64, alpha: f64) {
    behavior.fitness = ema_update(behavior.fitness, behavior.games, score, alpha);
    behavior.games += 1;
}

/// Apply the same observation `max(1, weight)` times
pub fn record_behavior_score_weighted<Ctx, Act>(
    behavior: &mut BehaviorUnit<Ctx, Act>,
    score: f64,
    alpha: f64,
    weight: u32,
) {
    for _ in 0..weight.max(1) {
        record_behavior_score(behavior, score, alpha);
    }
}

pub fn record_role_score(role: &mut RoleDefinition, score: f64, won: bool, alpha: f64) {
    role.fitness = ema_update(role.fitness, role.games, score, alpha);
    role.games += 1;
    if won {
        role.wins += 1;
    }
}

/// Apply the same observation `max(1, weight)` times
pub fn record_role_score_weighted(
    role: &mut RoleDefinition,
    score: f64,
    won: bool,
    alpha: f64,
    weight: u32,
) {
    for _ in 0..weight.max(1) {
        record_role_score(role, score, won, alpha);
    }
}

/// Lock the role's name once fitness reaches `threshold`
///
/// Returns true only when this call set the lock. Never unlocks.
pub fn lock_role_name_if_fit(role: &mut RoleDefinition, threshold: f64) -> bool {
    if !role.locked_name && role.fitness >= threshold {
        role.locked_name = true;
        return true;
    }
    false
}

/// Fitness updates bound to a configured alpha and lock threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessTracker {
    alpha: f64,
    lock_threshold: f64,
}

impl FitnessTracker {
    pub fn new(alpha: f64, lock_threshold: f64) -> Self {
        Self {
            alpha,
            lock_threshold,
        }
    }

    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self::new(config.fitness_alpha, config.lock_fitness_threshold)
    }

    pub fn record_behavior<Ctx, Act>(&self, behavior: &mut BehaviorUnit<Ctx, Act>, score: f64) {
        record_behavior_score(behavior, score, self.alpha);
    }

    /// Record a role outcome and apply name locking
    ///
    /// Returns true when the role's name was locked by this observation.
    pub fn record_role(&self, role: &mut RoleDefinition, score: f64, won: bool) -> bool {
        record_role_score(role, score, won, self.alpha);
        let locked = lock_role_name_if_fit(role, self.lock_threshold);
        if locked {
            debug!(role = %role.name, fitness = role.fitness, "Role name locked");
        }
        locked
    }
}

impl Default for FitnessTracker {
    fn default() -> Self {
        Self::from_config(&EvolutionConfig::default())
    }
}
