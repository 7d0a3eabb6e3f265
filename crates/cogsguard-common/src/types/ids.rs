//! Dense identifiers for catalog entries and agents
//!
//! Behaviors and roles are referenced by their position in the catalog.
//! Ids are assigned at insertion and never reused, so a plain index is a
//! stable handle for the lifetime of a run.

use serde::{Deserialize, Serialize};

/// Index of a behavior unit in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehaviorId(pub usize);

/// Index of a role definition in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub usize);

/// Identifier of an agent in the running game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl BehaviorId {
    /// Position in the catalog's behavior list
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl RoleId {
    /// Position in the catalog's role list
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for BehaviorId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<usize> for RoleId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "behavior#{}", self.0)
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role#{}", self.0)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}
