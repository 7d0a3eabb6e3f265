//! Sampling a fresh role from the catalog

use cogsguard_common::BehaviorId;
use rand::Rng;

use crate::catalog::Catalog;
use crate::role::{RoleDefinition, RoleOrigin, RoleTier, TierSelection};
use crate::selection::{behavior_selection_weight, weighted_pick_index};
use crate::EvolutionConfig;

/// Create a new role by drawing behaviors into random tiers
///
/// Tier count and sizes are drawn uniformly from the configured ranges and
/// the total is capped at `max_behaviors_per_role`. Behaviors are picked by
/// `behavior_selection_weight`, distinct across the role until the catalog
/// runs out of unused ids. Each tier is Fixed or Shuffle with equal odds.
/// An empty catalog yields [`RoleDefinition::empty`].
pub fn sample_role<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    config: &EvolutionConfig,
    rng: &mut R,
) -> RoleDefinition {
    if !catalog.has_behaviors() || config.max_behaviors_per_role == 0 {
        return RoleDefinition::empty();
    }

    let tier_count = rng.gen_range(config.min_tiers..=config.max_tiers.max(config.min_tiers));
    let mut used = vec![false; catalog.behavior_count()];
    let mut remaining = config.max_behaviors_per_role;
    let mut tiers = Vec::with_capacity(tier_count);

    for _ in 0..tier_count {
        if remaining == 0 {
            break;
        }
        let max_size = config.max_tier_size.min(remaining);
        if max_size == 0 {
            break;
        }
        let min_size = config.min_tier_size.clamp(1, max_size);
        let size = rng.gen_range(min_size..=max_size);

        let behavior_ids = sample_tier_ids(catalog, size, &mut used, rng);
        if behavior_ids.is_empty() {
            break;
        }
        remaining = remaining.saturating_sub(behavior_ids.len());

        let selection = if rng.gen_bool(0.5) {
            TierSelection::Shuffle
        } else {
            TierSelection::Fixed
        };
        tiers.push(RoleTier::new(behavior_ids, selection));
    }

    let name = catalog.generate_role_name(&tiers);
    RoleDefinition::new(name, tiers).with_origin(RoleOrigin::Sampled)
}

/// Draw up to `count` ids distinct within the tier
///
/// Prefers ids unused anywhere in the role. Once those are exhausted the
/// role-wide marks are dropped and ids from earlier tiers become eligible.
fn sample_tier_ids<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    count: usize,
    used: &mut [bool],
    rng: &mut R,
) -> Vec<BehaviorId> {
    let mut in_tier = vec![false; used.len()];
    let mut picked = Vec::with_capacity(count);

    while picked.len() < count {
        let mut candidates: Vec<usize> = (0..used.len()).filter(|i| !used[*i]).collect();
        if candidates.is_empty() {
            // Catalog exhausted for this role, allow reuse across tiers
            for (slot, taken) in used.iter_mut().zip(&in_tier) {
                *slot = *taken;
            }
            candidates = (0..used.len()).filter(|i| !used[*i]).collect();
            if candidates.is_empty() {
                break;
            }
        }

        let weights: Vec<f64> = candidates
            .iter()
            .map(|i| {
                catalog
                    .behavior(BehaviorId(*i))
                    .map(behavior_selection_weight)
                    .unwrap_or(0.0)
            })
            .collect();
        let Some(choice) = weighted_pick_index(&weights, rng) else {
            break;
        };

        let index = candidates[choice];
        used[index] = true;
        in_tier[index] = true;
        picked.push(BehaviorId(index));
    }

    picked
}
