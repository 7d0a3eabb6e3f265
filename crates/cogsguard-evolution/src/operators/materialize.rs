//! Turning a role into an ordered behavior list for the executor

use rand::Rng;
use tracing::warn;

use crate::behavior::BehaviorUnit;
use crate::catalog::Catalog;
use crate::role::RoleDefinition;
use crate::selection::resolve_tier_order;

/// Resolve every tier in order and concatenate the behaviors
///
/// Truncates to `max_behaviors` when given. An empty role gives an empty
/// list.
pub fn materialize_role_behaviors<'a, Ctx, Act, R: Rng + ?Sized>(
    catalog: &'a Catalog<Ctx, Act>,
    role: &RoleDefinition,
    max_behaviors: Option<usize>,
    rng: &mut R,
) -> Vec<&'a BehaviorUnit<Ctx, Act>> {
    let limit = max_behaviors.unwrap_or(usize::MAX);
    let mut result = Vec::new();
    if limit == 0 {
        return result;
    }

    for tier in &role.tiers {
        for id in resolve_tier_order(tier, rng) {
            match catalog.behavior(id) {
                Some(behavior) => result.push(behavior),
                None => warn!(role = %role.name, behavior = %id, "Skipping unknown behavior id"),
            }
            if result.len() >= limit {
                return result;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::testing::{scenario_catalog, test_miner};
    use crate::role::RoleTier;
    use cogsguard_common::BehaviorId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn names(behaviors: &[&BehaviorUnit<(), ()>]) -> Vec<String> {
        behaviors.iter().map(|b| b.name.clone()).collect()
    }

    #[test]
    fn test_test_miner_order() {
        let catalog = scenario_catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let behaviors = materialize_role_behaviors(&catalog, &test_miner(), None, &mut rng);
        assert_eq!(names(&behaviors), vec!["deposit", "mine", "explore"]);
    }

    #[test]
    fn test_truncation() {
        let catalog = scenario_catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let behaviors = materialize_role_behaviors(&catalog, &test_miner(), Some(2), &mut rng);
        assert_eq!(names(&behaviors), vec!["deposit", "mine"]);
        assert!(materialize_role_behaviors(&catalog, &test_miner(), Some(0), &mut rng).is_empty());
    }

    #[test]
    fn test_empty_role_materializes_empty() {
        let catalog = scenario_catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(
            materialize_role_behaviors(&catalog, &RoleDefinition::empty(), None, &mut rng)
                .is_empty()
        );
    }

    #[test]
    fn test_outer_tier_order_preserved_under_shuffle() {
        let catalog = scenario_catalog();
        let role = RoleDefinition::new(
            "Mixed",
            vec![
                RoleTier::shuffled(vec![BehaviorId(3), BehaviorId(4)]),
                RoleTier::fixed(vec![BehaviorId(0)]),
            ],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        for _ in 0..20 {
            let order = names(&materialize_role_behaviors(&catalog, &role, None, &mut rng));
            assert_eq!(order.len(), 3);
            assert!(order[..2].contains(&"attack".to_string()));
            assert!(order[..2].contains(&"defend".to_string()));
            assert_eq!(order[2], "explore");
        }
    }
}
