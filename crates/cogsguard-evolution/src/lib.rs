//! # CogsGuard Evolution
//!
//! Online evolutionary optimizer for agent roles in CogsGuard games.
//!
//! A role is an ordered list of tiers, each tier a group of behavior units
//! with its own ordering policy. Roles are scored by observed game outcomes
//! and the population is periodically evolved by selection, mutation, and
//! recombination.
//!
//! ## Fitness Formula
//!
//! ```text
//! f₁ = s₁
//! fₙ = fₙ₋₁ × (1 - α) + sₙ × α
//! ```
//!
//! Where:
//! - f: Fitness (0-1)
//! - s: Observed score (0-1, clamped by the caller)
//! - α: Smoothing factor (`fitness_alpha`)
//!
//! ## Flow per game
//!
//! ```text
//! assign_role ─▶ agent plays materialized behaviors ─▶ record_agent_performance
//!      ▲                                                        │
//!      └──── next generation ◀── breed cohort ◀── end_game ◀────┘
//! ```
//!
//! Roles that reach `lock_fitness_threshold` get their name locked. Roles are
//! never removed during a run.

pub mod behavior;
pub mod catalog;
pub mod coordinator;
pub mod fitness;
pub mod operators;
pub mod role;
pub mod seed;
pub mod selection;

use cogsguard_common::{EvolutionError, Result};
use serde::{Deserialize, Serialize};

pub use behavior::{BehaviorSource, BehaviorUnit, Capability, FnCapability, NoopCapability};
pub use behavior::hooks::{HookTable, HookedCapability};
pub use catalog::Catalog;
pub use coordinator::{
    AgentAssignment, CatalogSummary, Coordinator, GenerationPolicy, RoleSummary, Vibe,
};
pub use fitness::FitnessTracker;
pub use operators::{materialize_role_behaviors, mutate_role, recombine_roles, sample_role};
pub use role::{RoleDefinition, RoleOrigin, RoleTier, TierSelection};
pub use selection::{
    behavior_selection_weight, pick_role_id_weighted, resolve_tier_order, role_selection_weight,
};

/// Evolution configuration, fixed for the lifetime of a coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Minimum tiers in a sampled role
    pub min_tiers: usize,
    /// Maximum tiers in a sampled role
    pub max_tiers: usize,
    /// Minimum behaviors per sampled tier
    pub min_tier_size: usize,
    /// Maximum behaviors per sampled tier
    pub max_tier_size: usize,
    /// Probability that a single behavior id is replaced during mutation
    pub mutation_rate: f64,
    /// Fitness at which a role's name is locked
    pub lock_fitness_threshold: f64,
    /// Cap on behaviors referenced by a sampled role
    pub max_behaviors_per_role: usize,
    /// EMA smoothing factor
    pub fitness_alpha: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            min_tiers: cogsguard_common::DEFAULT_MIN_TIERS,
            max_tiers: cogsguard_common::DEFAULT_MAX_TIERS,
            min_tier_size: cogsguard_common::DEFAULT_MIN_TIER_SIZE,
            max_tier_size: cogsguard_common::DEFAULT_MAX_TIER_SIZE,
            mutation_rate: cogsguard_common::DEFAULT_MUTATION_RATE,
            lock_fitness_threshold: cogsguard_common::DEFAULT_LOCK_FITNESS_THRESHOLD,
            max_behaviors_per_role: cogsguard_common::DEFAULT_MAX_BEHAVIORS_PER_ROLE,
            fitness_alpha: cogsguard_common::DEFAULT_FITNESS_ALPHA,
        }
    }
}

impl EvolutionConfig {
    /// Check ranges and orderings of all fields
    pub fn validate(&self) -> Result<()> {
        if self.min_tiers == 0 || self.min_tiers > self.max_tiers {
            return Err(EvolutionError::Config(format!(
                "tier count range {}..={} is empty or starts at zero",
                self.min_tiers, self.max_tiers
            )));
        }
        if self.min_tier_size == 0 || self.min_tier_size > self.max_tier_size {
            return Err(EvolutionError::Config(format!(
                "tier size range {}..={} is empty or starts at zero",
                self.min_tier_size, self.max_tier_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionError::Config(format!(
                "mutation_rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        if !(self.fitness_alpha > 0.0 && self.fitness_alpha <= 1.0) {
            return Err(EvolutionError::Config(format!(
                "fitness_alpha {} outside (0, 1]",
                self.fitness_alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.lock_fitness_threshold) {
            return Err(EvolutionError::Config(format!(
                "lock_fitness_threshold {} outside [0, 1]",
                self.lock_fitness_threshold
            )));
        }
        Ok(())
    }
}
