//! Generation turnover: breeding pool and offspring cohort
//!
//! The population only grows. Each turnover picks a breeding pool from the
//! fittest roles and appends a cohort of children produced by recombination
//! plus mutation, or by mutation alone.

use cogsguard_common::{EvolutionError, Result, RoleId, DEFAULT_GAMES_PER_GENERATION};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::operators::mutate::mutate_tiers;
use crate::operators::{mutate_role, recombine_roles, sample_role};
use crate::role::{RoleDefinition, RoleOrigin};
use crate::selection::pick_role_id_weighted;
use crate::EvolutionConfig;

/// Coordinator-level evolution policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPolicy {
    /// Games played before the population evolves
    pub games_per_generation: u32,
    /// Share of roles, fittest first, eligible as parents (at least 2)
    pub breeding_fraction: f64,
    /// Children appended per turnover
    pub offspring_per_generation: usize,
    /// Probability a child comes from recombination (then mutation) rather
    /// than mutation of a single parent
    pub recombination_rate: f64,
    /// Probability of one extra freshly sampled role per turnover
    pub fresh_sample_rate: f64,
    /// Also credit each recorded score to the role's behaviors
    pub credit_behaviors: bool,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            games_per_generation: DEFAULT_GAMES_PER_GENERATION,
            breeding_fraction: 0.5,
            offspring_per_generation: 4,
            recombination_rate: 0.5,
            fresh_sample_rate: 0.1,
            credit_behaviors: false,
        }
    }
}

impl GenerationPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.games_per_generation == 0 {
            return Err(EvolutionError::Config(
                "games_per_generation must be at least 1".to_string(),
            ));
        }
        if self.offspring_per_generation == 0 {
            return Err(EvolutionError::Config(
                "offspring_per_generation must be at least 1".to_string(),
            ));
        }
        for (field, value) in [
            ("breeding_fraction", self.breeding_fraction),
            ("recombination_rate", self.recombination_rate),
            ("fresh_sample_rate", self.fresh_sample_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvolutionError::Config(format!("{field} {value} outside [0, 1]")));
            }
        }
        Ok(())
    }
}

/// Role ids sorted by fitness, best first, truncated to the breeding share
///
/// Ties keep registration order.
pub fn breeding_pool<Ctx, Act>(catalog: &Catalog<Ctx, Act>, fraction: f64) -> Vec<RoleId> {
    let mut ids = catalog.role_ids();
    ids.sort_by(|a, b| {
        let fa = catalog.role(*a).map_or(0.0, |r| r.fitness);
        let fb = catalog.role(*b).map_or(0.0, |r| r.fitness);
        fb.total_cmp(&fa)
    });

    let share = (ids.len() as f64 * fraction).ceil() as usize;
    ids.truncate(share.max(2).min(ids.len()));
    ids
}

/// Produce the next generation's new roles without registering them
///
/// With fewer than two roles there is nothing to breed, so two fresh roles
/// are sampled instead. Every child carries a non-manual origin, even when
/// the catalog has no behaviors to sample from.
pub fn breed_cohort<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    config: &EvolutionConfig,
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Vec<RoleDefinition> {
    let mut cohort = Vec::with_capacity(policy.offspring_per_generation + 1);

    if catalog.role_count() < 2 {
        for _ in 0..2 {
            cohort.push(sample_offspring(catalog, config, rng));
        }
        return cohort;
    }

    let pool = breeding_pool(catalog, policy.breeding_fraction);
    debug!(pool = pool.len(), "Selected breeding pool");

    for _ in 0..policy.offspring_per_generation {
        let Some(first) = pick_parent(catalog, &pool, rng) else {
            break;
        };

        let child = if rng.gen::<f64>() < policy.recombination_rate {
            let second = pick_parent(catalog, &pool, rng).unwrap_or(first);
            let mut child = recombine_roles(catalog, first, second, rng);
            child.tiers = mutate_tiers(catalog, &child.tiers, config.mutation_rate, rng);
            child
        } else {
            mutate_role(catalog, first, config.mutation_rate, rng)
        };
        cohort.push(child);
    }

    if rng.gen::<f64>() < policy.fresh_sample_rate {
        cohort.push(sample_offspring(catalog, config, rng));
    }

    cohort
}

/// Sampled child, an empty one when the catalog has no behaviors
fn sample_offspring<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    config: &EvolutionConfig,
    rng: &mut R,
) -> RoleDefinition {
    sample_role(catalog, config, rng).with_origin(RoleOrigin::Sampled)
}

fn pick_parent<'a, Ctx, Act, R: Rng + ?Sized>(
    catalog: &'a Catalog<Ctx, Act>,
    pool: &[RoleId],
    rng: &mut R,
) -> Option<&'a RoleDefinition> {
    pick_role_id_weighted(catalog, pool, rng).and_then(|id| catalog.role(id))
}
