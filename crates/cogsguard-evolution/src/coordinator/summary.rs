//! Read-only catalog snapshot for observability

use cogsguard_common::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::role::{RoleDefinition, RoleOrigin};

/// Per-role line of a [`CatalogSummary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub name: String,
    pub origin: RoleOrigin,
    pub fitness: f64,
    pub games: u32,
    pub wins: u32,
    pub locked: bool,
}

impl From<&RoleDefinition> for RoleSummary {
    fn from(role: &RoleDefinition) -> Self {
        Self {
            name: role.name.clone(),
            origin: role.origin,
            fitness: role.fitness,
            games: role.games,
            wins: role.wins,
            locked: role.locked_name,
        }
    }
}

/// Snapshot of coordinator and catalog state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub generation: u64,
    pub games_this_generation: u32,
    pub num_behaviors: usize,
    pub num_roles: usize,
    pub roles: Vec<RoleSummary>,
}

impl CatalogSummary {
    pub fn capture<Ctx, Act>(
        catalog: &Catalog<Ctx, Act>,
        generation: u64,
        games_this_generation: u32,
    ) -> Self {
        Self {
            generation,
            games_this_generation,
            num_behaviors: catalog.behavior_count(),
            num_roles: catalog.role_count(),
            roles: catalog.roles().iter().map(RoleSummary::from).collect(),
        }
    }

    /// Fittest role among those with at least one game
    pub fn best_role(&self) -> Option<&RoleSummary> {
        self.roles
            .iter()
            .filter(|r| r.games > 0)
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
