//! Role definitions - ordered tiers of behaviors
//!
//! Tier order is always preserved. Only the order of behaviors inside a tier
//! is subject to the tier's selection policy.

use std::str::FromStr;

use cogsguard_common::{BehaviorId, EvolutionError, RoleId};
use serde::{Deserialize, Serialize};

/// Name given to roles with no tiers
pub const EMPTY_ROLE_NAME: &str = "EmptyRole";

/// How behaviors inside a tier are ordered when the role is materialized
///
/// Deserialization goes through [`FromStr`], so unknown modes are rejected
/// with the same error as parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TierSelection {
    /// Keep the order as written
    #[default]
    Fixed,
    /// Uniform random permutation per materialization
    Shuffle,
    /// Weighted sampling without replacement using the tier weights
    Weighted,
}

impl TierSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierSelection::Fixed => "fixed",
            TierSelection::Shuffle => "shuffle",
            TierSelection::Weighted => "weighted",
        }
    }
}

impl std::fmt::Display for TierSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierSelection {
    type Err = EvolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(TierSelection::Fixed),
            "shuffle" => Ok(TierSelection::Shuffle),
            "weighted" => Ok(TierSelection::Weighted),
            _ => Err(EvolutionError::unsupported_selection(s)),
        }
    }
}

impl TryFrom<String> for TierSelection {
    type Error = EvolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A priority tier within a role
///
/// A sequencing instruction, not a set: duplicate ids are legal and kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleTier {
    /// Behaviors in this tier
    pub behavior_ids: Vec<BehaviorId>,
    /// Ordering policy
    pub selection: TierSelection,
    /// Weights parallel to `behavior_ids`, read only for `Weighted`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

impl RoleTier {
    pub fn new(behavior_ids: Vec<BehaviorId>, selection: TierSelection) -> Self {
        Self {
            behavior_ids,
            selection,
            weights: None,
        }
    }

    pub fn fixed(behavior_ids: Vec<BehaviorId>) -> Self {
        Self::new(behavior_ids, TierSelection::Fixed)
    }

    pub fn shuffled(behavior_ids: Vec<BehaviorId>) -> Self {
        Self::new(behavior_ids, TierSelection::Shuffle)
    }

    pub fn weighted(behavior_ids: Vec<BehaviorId>, weights: Vec<f64>) -> Self {
        Self {
            behavior_ids,
            selection: TierSelection::Weighted,
            weights: Some(weights),
        }
    }

    pub fn len(&self) -> usize {
        self.behavior_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behavior_ids.is_empty()
    }
}

/// How a role came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleOrigin {
    #[default]
    Manual,
    Sampled,
    Recombined,
    Mutated,
}

impl RoleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleOrigin::Manual => "manual",
            RoleOrigin::Sampled => "sampled",
            RoleOrigin::Recombined => "recombined",
            RoleOrigin::Mutated => "mutated",
        }
    }
}

impl std::fmt::Display for RoleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An evolvable agent strategy
///
/// Names are for humans and may repeat; the catalog id is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Catalog id, `None` until registered
    pub id: Option<RoleId>,
    /// Human-readable name
    pub name: String,
    /// Priority-ordered tiers
    pub tiers: Vec<RoleTier>,
    /// How the role was created
    pub origin: RoleOrigin,
    /// Number of score observations
    pub games: u32,
    /// Number of observations that were wins
    pub wins: u32,
    /// EMA fitness (0-1)
    pub fitness: f64,
    /// Set once fitness crosses the lock threshold, never cleared
    pub locked_name: bool,
}

impl RoleDefinition {
    /// A manual role with fresh statistics
    pub fn new(name: impl Into<String>, tiers: Vec<RoleTier>) -> Self {
        Self {
            id: None,
            name: name.into(),
            tiers,
            origin: RoleOrigin::default(),
            games: 0,
            wins: 0,
            fitness: 0.0,
            locked_name: false,
        }
    }

    /// Role with no tiers
    pub fn empty() -> Self {
        Self::new(EMPTY_ROLE_NAME, Vec::new())
    }

    pub fn with_origin(mut self, origin: RoleOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Every behavior id referenced, in tier order
    pub fn behavior_ids(&self) -> impl Iterator<Item = BehaviorId> + '_ {
        self.tiers.iter().flat_map(|t| t.behavior_ids.iter().copied())
    }

    /// Total behaviors referenced across tiers, duplicates included
    pub fn behavior_count(&self) -> usize {
        self.tiers.iter().map(RoleTier::len).sum()
    }

    pub fn has_tiers(&self) -> bool {
        !self.tiers.is_empty()
    }
}

impl std::fmt::Display for RoleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, tiers={}, fitness={:.3}, games={})",
            self.name,
            self.origin,
            self.tiers.len(),
            self.fitness,
            self.games
        )
    }
}
