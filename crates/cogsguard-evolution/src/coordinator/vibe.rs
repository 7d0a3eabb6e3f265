//! Mapping roles to executor vibes
//!
//! The executor picks its concrete action logic by vibe. A role's vibe is
//! the category of the behaviors it references most often.

use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorSource;
use crate::catalog::Catalog;
use crate::role::RoleDefinition;

/// Tag consumed by the behavior executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Miner,
    Scout,
    Aligner,
    Scrambler,
    /// Generic fallback, lets the executor choose for itself
    Gear,
}

impl Vibe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Miner => "miner",
            Vibe::Scout => "scout",
            Vibe::Aligner => "aligner",
            Vibe::Scrambler => "scrambler",
            Vibe::Gear => "gear",
        }
    }
}

impl std::fmt::Display for Vibe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BehaviorSource> for Vibe {
    fn from(source: BehaviorSource) -> Self {
        match source {
            BehaviorSource::Miner => Vibe::Miner,
            BehaviorSource::Scout => Vibe::Scout,
            BehaviorSource::Aligner => Vibe::Aligner,
            BehaviorSource::Scrambler => Vibe::Scrambler,
            BehaviorSource::Common => Vibe::Gear,
        }
    }
}

/// Vibe of the dominant behavior source in `role`
///
/// Ties go to the source seen first in tier order. Roles with no valid
/// behaviors map to [`Vibe::Gear`].
pub fn vibe_for_role<Ctx, Act>(catalog: &Catalog<Ctx, Act>, role: &RoleDefinition) -> Vibe {
    let mut counts: Vec<(BehaviorSource, usize)> = Vec::new();
    for source in role
        .behavior_ids()
        .filter_map(|id| catalog.behavior(id))
        .map(|b| b.source)
    {
        match counts.iter_mut().find(|(s, _)| *s == source) {
            Some((_, n)) => *n += 1,
            None => counts.push((source, 1)),
        }
    }

    let mut dominant: Option<(BehaviorSource, usize)> = None;
    for (source, n) in counts {
        if dominant.map_or(true, |(_, best)| n > best) {
            dominant = Some((source, n));
        }
    }

    dominant.map(|(source, _)| Vibe::from(source)).unwrap_or(Vibe::Gear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::hooks::HookTable;
    use crate::role::RoleTier;
    use crate::seed::{seed_base_roles, seed_default_behaviors};
    use cogsguard_common::BehaviorId;

    fn seeded() -> Catalog<(), ()> {
        let mut catalog = Catalog::new();
        seed_default_behaviors(&mut catalog, &HookTable::new());
        seed_base_roles(&mut catalog).unwrap();
        catalog
    }

    #[test]
    fn test_base_roles_map_to_their_vibe() {
        let catalog = seeded();
        let expected = [Vibe::Miner, Vibe::Scout, Vibe::Aligner, Vibe::Scrambler];
        for (role, vibe) in catalog.roles().iter().zip(expected) {
            assert_eq!(vibe_for_role(&catalog, role), vibe, "role {}", role.name);
        }
    }

    #[test]
    fn test_empty_role_is_gear() {
        let catalog = seeded();
        assert_eq!(vibe_for_role(&catalog, &RoleDefinition::empty()), Vibe::Gear);
    }

    #[test]
    fn test_common_only_is_gear() {
        let catalog = seeded();
        let role = RoleDefinition::new("Wander", vec![RoleTier::fixed(vec![BehaviorId(0), BehaviorId(1)])]);
        assert_eq!(vibe_for_role(&catalog, &role), Vibe::Gear);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let catalog = seeded();
        let scout = catalog.find_behavior_id("discover_stations").unwrap();
        let miner = catalog.find_behavior_id("mine_resource").unwrap();
        let role = RoleDefinition::new("Tie", vec![RoleTier::fixed(vec![scout, miner])]);
        assert_eq!(vibe_for_role(&catalog, &role), Vibe::Scout);
    }

    #[test]
    fn test_vibe_strings() {
        assert_eq!(Vibe::Gear.to_string(), "gear");
        assert_eq!(serde_json::to_string(&Vibe::Aligner).unwrap(), "\"aligner\"");
    }
}
