//! Role catalog - registry of behaviors and roles
//!
//! The catalog exclusively owns every behavior unit and role definition.
//! Everything else refers to them by dense id, which lets an operator read
//! two roles while building a third without aliasing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cogsguard_common::{BehaviorId, EvolutionError, Result, RoleId};
use tracing::debug;

use crate::behavior::{BehaviorSource, BehaviorUnit, Capability, SharedCapability};
use crate::role::{RoleDefinition, RoleTier};

/// Prefixes dropped from behavior names when deriving role names
const NAME_PREFIXES: [&str; 5] = ["behavior_", "miner_", "scout_", "aligner_", "scrambler_"];

/// Registry of behaviors and roles for evolutionary selection
pub struct Catalog<Ctx, Act> {
    behaviors: Vec<BehaviorUnit<Ctx, Act>>,
    roles: Vec<RoleDefinition>,
    behavior_index: HashMap<String, BehaviorId>,
    // Advances through `&self` so operators can borrow the catalog immutably
    next_name_id: AtomicU64,
}

impl<Ctx, Act> Default for Catalog<Ctx, Act> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, Act> Catalog<Ctx, Act> {
    pub fn new() -> Self {
        Self {
            behaviors: Vec::new(),
            roles: Vec::new(),
            behavior_index: HashMap::new(),
            next_name_id: AtomicU64::new(0),
        }
    }

    /// Add a behavior, returns its id
    ///
    /// Re-adding an existing name (exact, case-sensitive) returns the
    /// existing id and leaves the catalog unchanged.
    pub fn add_behavior<C>(
        &mut self,
        name: impl Into<String>,
        source: BehaviorSource,
        capability: C,
    ) -> BehaviorId
    where
        C: Capability<Ctx, Act> + 'static,
    {
        self.add_shared_behavior(name, source, Arc::new(capability), true)
    }

    /// Add a behavior with an already shared capability and explicit
    /// interruptibility
    pub fn add_shared_behavior(
        &mut self,
        name: impl Into<String>,
        source: BehaviorSource,
        capability: SharedCapability<Ctx, Act>,
        interruptible: bool,
    ) -> BehaviorId {
        let name = name.into();
        if let Some(existing) = self.behavior_index.get(&name) {
            return *existing;
        }

        let id = BehaviorId(self.behaviors.len());
        debug!(behavior = %name, %source, id = id.index(), "Registered behavior");
        self.behavior_index.insert(name.clone(), id);
        self.behaviors
            .push(BehaviorUnit::new(id, name, source, interruptible, capability));
        id
    }

    pub fn find_behavior_id(&self, name: &str) -> Option<BehaviorId> {
        self.behavior_index.get(name).copied()
    }

    /// First role registered under `name`
    pub fn find_role_id(&self, name: &str) -> Option<RoleId> {
        self.roles
            .iter()
            .position(|role| role.name == name)
            .map(RoleId)
    }

    /// Register a role under the next dense id
    ///
    /// Any id already set on the input is overwritten. Fails if the role
    /// references a behavior outside the catalog.
    pub fn register_role(&mut self, mut role: RoleDefinition) -> Result<RoleId> {
        self.validate_role(&role)?;

        let id = RoleId(self.roles.len());
        role.id = Some(id);
        debug!(role = %role.name, origin = %role.origin, id = id.index(), "Registered role");
        self.roles.push(role);
        Ok(id)
    }

    /// Check that every referenced behavior id is in range
    pub fn validate_role(&self, role: &RoleDefinition) -> Result<()> {
        self.validate_tiers(&role.tiers)
    }

    pub fn validate_tiers(&self, tiers: &[RoleTier]) -> Result<()> {
        let behavior_count = self.behaviors.len();
        match tiers
            .iter()
            .flat_map(|t| t.behavior_ids.iter())
            .find(|id| id.index() >= behavior_count)
        {
            Some(bad) => Err(EvolutionError::BehaviorOutOfRange {
                behavior_id: *bad,
                behavior_count,
            }),
            None => Ok(()),
        }
    }

    /// Derive a readable name from the primary behavior plus a counter
    ///
    /// Identical tiers yield different names on every call.
    pub fn generate_role_name(&self, tiers: &[RoleTier]) -> String {
        let base = tiers
            .iter()
            .flat_map(|t| t.behavior_ids.first())
            .next()
            .and_then(|id| self.behavior(*id))
            .map(|b| short_behavior_name(&b.name))
            .unwrap_or_else(|| "Role".to_string());

        let suffix = self.next_name_id.fetch_add(1, Ordering::Relaxed);
        format!("{base}-{suffix}")
    }

    pub fn behavior(&self, id: BehaviorId) -> Option<&BehaviorUnit<Ctx, Act>> {
        self.behaviors.get(id.index())
    }

    pub fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut BehaviorUnit<Ctx, Act>> {
        self.behaviors.get_mut(id.index())
    }

    pub fn role(&self, id: RoleId) -> Option<&RoleDefinition> {
        self.roles.get(id.index())
    }

    pub fn role_mut(&mut self, id: RoleId) -> Option<&mut RoleDefinition> {
        self.roles.get_mut(id.index())
    }

    /// Role lookup that must succeed
    pub fn require_role(&self, id: RoleId) -> Result<&RoleDefinition> {
        self.role(id).ok_or(EvolutionError::RoleNotFound(id))
    }

    pub fn behaviors(&self) -> &[BehaviorUnit<Ctx, Act>] {
        &self.behaviors
    }

    pub fn roles(&self) -> &[RoleDefinition] {
        &self.roles
    }

    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Ids of every registered role, in registration order
    pub fn role_ids(&self) -> Vec<RoleId> {
        (0..self.roles.len()).map(RoleId).collect()
    }

    pub fn has_behaviors(&self) -> bool {
        !self.behaviors.is_empty()
    }
}

/// `miner_mine_resource` -> `MineResource`
fn short_behavior_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let trimmed = NAME_PREFIXES
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .map(|prefix| &name[prefix.len()..])
        .unwrap_or(name);

    let short: String = trimmed
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();

    if short.is_empty() {
        "Behavior".to_string()
    } else {
        short
    }
}
