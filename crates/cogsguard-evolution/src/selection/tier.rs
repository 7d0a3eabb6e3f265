//! Tier ordering policies

use cogsguard_common::BehaviorId;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use super::weights::weighted_pick_index;
use crate::role::{RoleTier, TierSelection};

/// Resolve the execution order of a tier's behaviors
///
/// - `Fixed`: as written, no randomness consumed
/// - `Shuffle`: uniform permutation
/// - `Weighted`: sampling without replacement by `weights`. Every id is
///   returned; zero weights only push entries toward the back. Missing or
///   mismatched weights fall back to uniform.
pub fn resolve_tier_order<R: Rng + ?Sized>(tier: &RoleTier, rng: &mut R) -> Vec<BehaviorId> {
    if tier.behavior_ids.is_empty() {
        return Vec::new();
    }

    match tier.selection {
        TierSelection::Fixed => tier.behavior_ids.clone(),
        TierSelection::Shuffle => {
            let mut order = tier.behavior_ids.clone();
            order.shuffle(rng);
            order
        }
        TierSelection::Weighted => weighted_order(tier, rng),
    }
}

fn weighted_order<R: Rng + ?Sized>(tier: &RoleTier, rng: &mut R) -> Vec<BehaviorId> {
    let mut ids = tier.behavior_ids.clone();
    let mut weights = match &tier.weights {
        Some(w) if w.len() == ids.len() => w.clone(),
        Some(w) => {
            warn!(
                ids = ids.len(),
                weights = w.len(),
                "Tier weights do not match behaviors, using uniform order weights"
            );
            vec![1.0; ids.len()]
        }
        None => vec![1.0; ids.len()],
    };

    let mut order = Vec::with_capacity(ids.len());
    while let Some(idx) = weighted_pick_index(&weights, rng) {
        order.push(ids.remove(idx));
        weights.remove(idx);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn ids(raw: &[usize]) -> Vec<BehaviorId> {
        raw.iter().copied().map(BehaviorId).collect()
    }

    fn sorted(mut v: Vec<BehaviorId>) -> Vec<BehaviorId> {
        v.sort();
        v
    }

    #[test]
    fn test_empty_tier_resolves_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for selection in [TierSelection::Fixed, TierSelection::Shuffle, TierSelection::Weighted] {
            let tier = RoleTier::new(Vec::new(), selection);
            assert!(resolve_tier_order(&tier, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_fixed_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tier = RoleTier::fixed(ids(&[3, 1, 4, 1, 5]));
        for _ in 0..10 {
            assert_eq!(resolve_tier_order(&tier, &mut rng), tier.behavior_ids);
        }
    }

    #[test]
    fn test_shuffle_produces_several_orders() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let tier = RoleTier::shuffled(ids(&[0, 1, 2, 3, 4]));

        let mut seen = HashSet::new();
        for _ in 0..10 {
            let order = resolve_tier_order(&tier, &mut rng);
            assert_eq!(sorted(order.clone()), ids(&[0, 1, 2, 3, 4]));
            seen.insert(order);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_weighted_keeps_zero_weight_entries_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let tier = RoleTier::weighted(ids(&[7, 8, 9]), vec![0.0, 1.0, 0.0]);
        for _ in 0..20 {
            let order = resolve_tier_order(&tier, &mut rng);
            assert_eq!(order.len(), 3);
            assert_eq!(order[0], BehaviorId(8));
            assert_eq!(sorted(order), ids(&[7, 8, 9]));
        }
    }

    #[test]
    fn test_weighted_bias_toward_heavy_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let tier = RoleTier::weighted(ids(&[0, 1]), vec![9.0, 1.0]);
        let heavy_first = (0..200)
            .filter(|_| resolve_tier_order(&tier, &mut rng)[0] == BehaviorId(0))
            .count();
        assert!(heavy_first > 100);
    }

    #[test]
    fn test_weighted_with_mismatched_weights_still_complete() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let tier = RoleTier::weighted(ids(&[1, 2, 3]), vec![1.0]);
        assert_eq!(sorted(resolve_tier_order(&tier, &mut rng)), ids(&[1, 2, 3]));
    }

    proptest! {
        #[test]
        fn prop_weighted_preserves_multiset(
            raw in proptest::collection::vec(0usize..6, 0..12),
            seed in any::<u64>(),
        ) {
            let weights: Vec<f64> = raw.iter().map(|i| (*i % 3) as f64).collect();
            let tier = RoleTier::weighted(ids(&raw), weights);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let order = resolve_tier_order(&tier, &mut rng);
            prop_assert_eq!(sorted(order), sorted(ids(&raw)));
        }
    }
}
