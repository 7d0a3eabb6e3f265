//! Standard CogsGuard behaviors and the four hand-written base roles

use std::sync::Arc;

use cogsguard_common::{EvolutionError, Result, RoleId};

use crate::behavior::hooks::{HookTable, HookedCapability};
use crate::behavior::BehaviorSource;
use crate::catalog::Catalog;
use crate::role::{RoleDefinition, RoleTier};

/// Behaviors every CogsGuard catalog starts with
pub const DEFAULT_BEHAVIORS: [(&str, BehaviorSource); 13] = [
    ("explore", BehaviorSource::Common),
    ("recharge", BehaviorSource::Common),
    ("mine_resource", BehaviorSource::Miner),
    ("deposit_resource", BehaviorSource::Miner),
    ("find_extractor", BehaviorSource::Miner),
    ("discover_stations", BehaviorSource::Scout),
    ("discover_extractors", BehaviorSource::Scout),
    ("discover_chargers", BehaviorSource::Scout),
    ("get_hearts", BehaviorSource::Aligner),
    ("get_influence", BehaviorSource::Aligner),
    ("align_charger", BehaviorSource::Aligner),
    ("scramble_charger", BehaviorSource::Scrambler),
    ("find_enemy_charger", BehaviorSource::Scrambler),
];

/// Base roles as (name, tiers of behavior names), all tiers fixed
const BASE_ROLES: [(&str, &[&[&str]]); 4] = [
    (
        "BaseMiner",
        &[&["deposit_resource"], &["mine_resource"], &["find_extractor"], &["explore"]],
    ),
    (
        "BaseScout",
        &[
            &["discover_stations"],
            &["discover_extractors"],
            &["discover_chargers"],
            &["explore"],
        ],
    ),
    (
        "BaseAligner",
        &[&["get_hearts", "get_influence"], &["align_charger"], &["explore"]],
    ),
    (
        "BaseScrambler",
        &[&["get_hearts"], &["find_enemy_charger"], &["scramble_charger"], &["explore"]],
    ),
];

/// Register the default behaviors, each dispatching through `hooks`
pub fn seed_default_behaviors<Ctx, Act>(catalog: &mut Catalog<Ctx, Act>, hooks: &HookTable<Ctx, Act>)
where
    Ctx: 'static,
    Act: 'static,
{
    for (name, source) in DEFAULT_BEHAVIORS {
        let capability = HookedCapability::new(name, hooks.clone());
        catalog.add_shared_behavior(name, source, Arc::new(capability), true);
    }
}

/// Register BaseMiner, BaseScout, BaseAligner and BaseScrambler
///
/// Requires the default behaviors to be present.
pub fn seed_base_roles<Ctx, Act>(catalog: &mut Catalog<Ctx, Act>) -> Result<Vec<RoleId>> {
    let mut ids = Vec::with_capacity(BASE_ROLES.len());
    for (name, tiers) in BASE_ROLES {
        let tiers = tiers
            .iter()
            .map(|names| {
                names
                    .iter()
                    .map(|behavior| {
                        catalog.find_behavior_id(behavior).ok_or_else(|| {
                            EvolutionError::InvalidArgument(format!(
                                "base role {name} needs unknown behavior {behavior}"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(RoleTier::fixed)
            })
            .collect::<Result<Vec<_>>>()?;
        ids.push(catalog.register_role(RoleDefinition::new(name, tiers))?);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{RoleOrigin, TierSelection};
    use cogsguard_common::BehaviorId;

    #[test]
    fn test_seed_registers_all_defaults() {
        let hooks: HookTable<(), ()> = HookTable::new();
        let mut catalog = Catalog::new();
        seed_default_behaviors(&mut catalog, &hooks);
        assert_eq!(catalog.behavior_count(), DEFAULT_BEHAVIORS.len());

        // Seeding twice is a no-op
        seed_default_behaviors(&mut catalog, &hooks);
        assert_eq!(catalog.behavior_count(), DEFAULT_BEHAVIORS.len());
    }

    #[test]
    fn test_base_roles() {
        let hooks: HookTable<(), ()> = HookTable::new();
        let mut catalog = Catalog::new();
        seed_default_behaviors(&mut catalog, &hooks);
        let ids = seed_base_roles(&mut catalog).unwrap();
        assert_eq!(ids, vec![RoleId(0), RoleId(1), RoleId(2), RoleId(3)]);

        let miner = catalog.role(ids[0]).unwrap();
        assert_eq!(miner.name, "BaseMiner");
        assert_eq!(miner.origin, RoleOrigin::Manual);
        assert_eq!(miner.tiers[0].behavior_ids, vec![BehaviorId(3)]);
        assert!(miner.tiers.iter().all(|t| t.selection == TierSelection::Fixed));

        let aligner = catalog.role(ids[2]).unwrap();
        assert_eq!(aligner.tiers.len(), 3);
        assert_eq!(aligner.tiers[0].len(), 2);
    }

    #[test]
    fn test_base_roles_need_behaviors() {
        let mut catalog: Catalog<(), ()> = Catalog::new();
        assert!(matches!(
            seed_base_roles(&mut catalog),
            Err(EvolutionError::InvalidArgument(_))
        ));
    }
}
