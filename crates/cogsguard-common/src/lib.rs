//! # CogsGuard Common
//!
//! Shared identifiers, errors, and tuning defaults for the CogsGuard role
//! evolution engine.
//!
//! ## Core Types
//!
//! - [`BehaviorId`]: dense index of a behavior unit in the catalog
//! - [`RoleId`]: dense index of a role definition in the catalog
//! - [`AgentId`]: identifier of an agent taking part in a game
//! - [`EvolutionError`]: unified error type for catalog and coordinator operations

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{EvolutionError, Result};
pub use types::ids::{AgentId, BehaviorId, RoleId};

/// CogsGuard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum tiers in a sampled role
pub const DEFAULT_MIN_TIERS: usize = 2;

/// Maximum tiers in a sampled role
pub const DEFAULT_MAX_TIERS: usize = 4;

/// Minimum behaviors per sampled tier
pub const DEFAULT_MIN_TIER_SIZE: usize = 1;

/// Maximum behaviors per sampled tier
pub const DEFAULT_MAX_TIER_SIZE: usize = 3;

/// Per-behavior replacement probability during mutation
pub const DEFAULT_MUTATION_RATE: f64 = 0.15;

/// Fitness at which a role's name becomes final
pub const DEFAULT_LOCK_FITNESS_THRESHOLD: f64 = 0.7;

/// Cap on behaviors referenced by a sampled role
pub const DEFAULT_MAX_BEHAVIORS_PER_ROLE: usize = 12;

/// EMA smoothing factor for fitness updates
pub const DEFAULT_FITNESS_ALPHA: f64 = 0.2;

/// Games played before the population evolves
pub const DEFAULT_GAMES_PER_GENERATION: u32 = 10;

/// Selection weight of a behavior with no recorded games
pub const UNTESTED_BEHAVIOR_WEIGHT: f64 = 1.0;

/// Selection weight of a role with no recorded games
pub const UNTESTED_ROLE_WEIGHT: f64 = 0.1;

/// Floor applied to fitness-derived selection weights
pub const MIN_SELECTION_WEIGHT: f64 = 0.1;
