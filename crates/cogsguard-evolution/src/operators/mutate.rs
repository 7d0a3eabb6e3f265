//! Point mutation of roles

use cogsguard_common::BehaviorId;
use rand::Rng;

use crate::catalog::Catalog;
use crate::role::{RoleDefinition, RoleOrigin, RoleTier, TierSelection};

/// Apply point mutations to a copy of `role`
///
/// Tier count and tier sizes are preserved. Each behavior id is replaced
/// with probability `mutation_rate` by a different id drawn uniformly from
/// the catalog. Fixed and Shuffle tiers additionally flip to the other mode
/// with probability `mutation_rate / 2`. The child gets a fresh name and
/// fresh statistics.
pub fn mutate_role<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    role: &RoleDefinition,
    mutation_rate: f64,
    rng: &mut R,
) -> RoleDefinition {
    let tiers = mutate_tiers(catalog, &role.tiers, mutation_rate, rng);
    let name = catalog.generate_role_name(&tiers);
    RoleDefinition::new(name, tiers).with_origin(RoleOrigin::Mutated)
}

pub(crate) fn mutate_tiers<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    tiers: &[RoleTier],
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<RoleTier> {
    let rate = mutation_rate.clamp(0.0, 1.0);
    let behavior_count = catalog.behavior_count();

    tiers
        .iter()
        .map(|tier| {
            let mut child = tier.clone();
            if child.is_empty() {
                return child;
            }

            for slot in child.behavior_ids.iter_mut() {
                if rng.gen::<f64>() < rate {
                    *slot = different_behavior(*slot, behavior_count, rng);
                }
            }

            if child.selection != TierSelection::Weighted && rng.gen::<f64>() < rate * 0.5 {
                child.selection = match child.selection {
                    TierSelection::Fixed => TierSelection::Shuffle,
                    _ => TierSelection::Fixed,
                };
            }
            child
        })
        .collect()
}

/// Uniform pick among valid ids other than `current`
///
/// With fewer than two behaviors there is no alternative and `current` is
/// kept when valid.
fn different_behavior<R: Rng + ?Sized>(
    current: BehaviorId,
    behavior_count: usize,
    rng: &mut R,
) -> BehaviorId {
    match behavior_count {
        0 => current,
        1 => BehaviorId(0),
        n if current.index() >= n => BehaviorId(rng.gen_range(0..n)),
        n => {
            let pick = rng.gen_range(0..n - 1);
            BehaviorId(if pick >= current.index() { pick + 1 } else { pick })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::testing::{scenario_catalog, test_miner};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_rate_is_identity() {
        let catalog = scenario_catalog();
        let parent = test_miner();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..20 {
            let child = mutate_role(&catalog, &parent, 0.0, &mut rng);
            assert_eq!(child.tiers, parent.tiers);
            assert_eq!(child.origin, RoleOrigin::Mutated);
        }
    }

    #[test]
    fn test_full_rate_changes_every_id() {
        let catalog = scenario_catalog();
        let parent = test_miner();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let child = mutate_role(&catalog, &parent, 1.0, &mut rng);

        assert_ne!(child.tiers, parent.tiers);
        for (before, after) in parent.tiers.iter().zip(&child.tiers) {
            assert_eq!(before.len(), after.len());
            for (a, b) in before.behavior_ids.iter().zip(&after.behavior_ids) {
                assert_ne!(a, b);
            }
        }
        assert!(catalog.validate_role(&child).is_ok());
    }

    #[test]
    fn test_shape_preserved_and_ids_valid() {
        let catalog = scenario_catalog();
        let parent = test_miner();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..100 {
            let child = mutate_role(&catalog, &parent, 0.5, &mut rng);
            assert_eq!(child.tiers.len(), parent.tiers.len());
            for (before, after) in parent.tiers.iter().zip(&child.tiers) {
                assert_eq!(before.len(), after.len());
            }
            assert!(catalog.validate_role(&child).is_ok());
        }
    }

    #[test]
    fn test_child_statistics_are_fresh() {
        let catalog = scenario_catalog();
        let mut parent = test_miner();
        parent.games = 12;
        parent.wins = 5;
        parent.fitness = 0.9;
        parent.locked_name = true;

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let child = mutate_role(&catalog, &parent, 0.3, &mut rng);
        assert_eq!(child.games, 0);
        assert_eq!(child.wins, 0);
        assert_eq!(child.fitness, 0.0);
        assert!(!child.locked_name);
        assert_ne!(child.name, parent.name);
    }

    #[test]
    fn test_weighted_tiers_keep_selection() {
        let catalog = scenario_catalog();
        let parent = RoleDefinition::new(
            "W",
            vec![RoleTier::weighted(vec![BehaviorId(0), BehaviorId(1)], vec![2.0, 1.0])],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            let child = mutate_role(&catalog, &parent, 1.0, &mut rng);
            assert_eq!(child.tiers[0].selection, TierSelection::Weighted);
            assert_eq!(child.tiers[0].weights, Some(vec![2.0, 1.0]));
        }
    }

    #[test]
    fn test_different_behavior_edge_cases() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(different_behavior(BehaviorId(0), 1, &mut rng), BehaviorId(0));
        for _ in 0..50 {
            assert_ne!(different_behavior(BehaviorId(2), 3, &mut rng), BehaviorId(2));
            assert!(different_behavior(BehaviorId(7), 3, &mut rng).index() < 3);
        }
    }
}
