//! Selection weights and roulette-wheel sampling
//!
//! Untested behaviors get full weight so they are tried early. Untested
//! roles get the floor weight, since evaluating a role costs whole games.

use cogsguard_common::{
    RoleId, MIN_SELECTION_WEIGHT, UNTESTED_BEHAVIOR_WEIGHT, UNTESTED_ROLE_WEIGHT,
};
use rand::Rng;

use crate::behavior::BehaviorUnit;
use crate::catalog::Catalog;
use crate::role::RoleDefinition;

pub fn behavior_selection_weight<Ctx, Act>(behavior: &BehaviorUnit<Ctx, Act>) -> f64 {
    if behavior.games == 0 {
        return UNTESTED_BEHAVIOR_WEIGHT;
    }
    behavior.fitness.max(MIN_SELECTION_WEIGHT)
}

pub fn role_selection_weight(role: &RoleDefinition) -> f64 {
    if role.games == 0 {
        return UNTESTED_ROLE_WEIGHT;
    }
    role.fitness.max(MIN_SELECTION_WEIGHT)
}

/// Roulette-wheel pick against a single draw
///
/// Non-positive weights are never picked while any positive weight exists.
/// When none is positive the pick is uniform. Returns `None` only for an
/// empty slice.
pub fn weighted_pick_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if !(total > 0.0) {
        return Some(rng.gen_range(0..weights.len()));
    }

    let roll = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    let mut last_positive = 0;
    for (i, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        acc += w;
        last_positive = i;
        if roll < acc {
            return Some(i);
        }
    }

    // Rounding left the roll at the very top of the wheel
    Some(last_positive)
}

/// Pick a role id weighted by `role_selection_weight`
///
/// `None` for an empty candidate list. A single candidate is returned as is
/// without drawing. Ids outside the catalog carry zero weight.
pub fn pick_role_id_weighted<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    candidates: &[RoleId],
    rng: &mut R,
) -> Option<RoleId> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => {
            let weights: Vec<f64> = candidates
                .iter()
                .map(|id| catalog.role(*id).map(role_selection_weight).unwrap_or(0.0))
                .collect();
            weighted_pick_index(&weights, rng).map(|i| candidates[i])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{BehaviorSource, NoopCapability};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog_with_roles(stats: &[(u32, f64)]) -> Catalog<(), ()> {
        let mut catalog = Catalog::new();
        catalog.add_behavior("explore", BehaviorSource::Common, NoopCapability);
        for (i, (games, fitness)) in stats.iter().enumerate() {
            let mut role = RoleDefinition::new(format!("R{i}"), Vec::new());
            role.games = *games;
            role.fitness = *fitness;
            catalog.register_role(role).unwrap();
        }
        catalog
    }

    #[test]
    fn test_behavior_weight_favors_untested() {
        let mut catalog: Catalog<(), ()> = Catalog::new();
        let id = catalog.add_behavior("mine", BehaviorSource::Miner, NoopCapability);
        assert_eq!(behavior_selection_weight(catalog.behavior(id).unwrap()), 1.0);

        let b = catalog.behavior_mut(id).unwrap();
        b.games = 3;
        b.fitness = 0.02;
        assert_eq!(behavior_selection_weight(b), 0.1);
        b.fitness = 0.65;
        assert!((behavior_selection_weight(b) - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_role_weight_penalizes_untested() {
        let mut role = RoleDefinition::new("R", Vec::new());
        assert_eq!(role_selection_weight(&role), 0.1);
        role.games = 2;
        role.fitness = 0.0;
        assert_eq!(role_selection_weight(&role), 0.1);
        role.fitness = 0.9;
        assert!((role_selection_weight(&role) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_pick_empty_and_singleton() {
        let catalog = catalog_with_roles(&[(0, 0.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick_role_id_weighted(&catalog, &[], &mut rng), None);
        // Singleton is returned unchanged, even when not in the catalog
        assert_eq!(
            pick_role_id_weighted(&catalog, &[RoleId(9)], &mut rng),
            Some(RoleId(9))
        );
    }

    #[test]
    fn test_pick_prefers_fitter_role() {
        let catalog = catalog_with_roles(&[(10, 0.9), (10, 0.1)]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let candidates = catalog.role_ids();

        let mut counts = [0usize; 2];
        for _ in 0..100 {
            let id = pick_role_id_weighted(&catalog, &candidates, &mut rng).unwrap();
            counts[id.index()] += 1;
        }
        assert!(counts[0] > counts[1], "counts = {:?}", counts);
    }

    #[test]
    fn test_weighted_pick_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(weighted_pick_index(&[0.0, 2.0, 0.0], &mut rng), Some(1));
        }
        assert_eq!(weighted_pick_index(&[], &mut rng), None);
    }

    #[test]
    fn test_weighted_pick_all_zero_is_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[weighted_pick_index(&[0.0, 0.0, -1.0], &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
