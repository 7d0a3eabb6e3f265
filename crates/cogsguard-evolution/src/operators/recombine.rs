//! Crossover of two parent roles

use rand::Rng;

use crate::catalog::Catalog;
use crate::role::{RoleDefinition, RoleOrigin};

/// Create a child from the left parent's head and the right parent's tail
///
/// Random cut points are drawn in each parent. The child takes the left
/// tiers before its cut followed by the right tiers from its cut; if that
/// is empty it falls back to the left parent's first tier. A parent with no
/// tiers contributes nothing, and two empty parents yield an empty role.
pub fn recombine_roles<Ctx, Act, R: Rng + ?Sized>(
    catalog: &Catalog<Ctx, Act>,
    left: &RoleDefinition,
    right: &RoleDefinition,
    rng: &mut R,
) -> RoleDefinition {
    let tiers = match (left.has_tiers(), right.has_tiers()) {
        (false, false) => {
            return RoleDefinition::empty().with_origin(RoleOrigin::Recombined);
        }
        (false, true) => right.tiers.clone(),
        (true, false) => left.tiers.clone(),
        (true, true) => {
            let cut_left = rng.gen_range(0..=left.tiers.len());
            let cut_right = rng.gen_range(0..=right.tiers.len());

            let mut tiers = Vec::with_capacity(cut_left + right.tiers.len() - cut_right);
            tiers.extend_from_slice(&left.tiers[..cut_left]);
            tiers.extend_from_slice(&right.tiers[cut_right..]);
            if tiers.is_empty() {
                tiers.push(left.tiers[0].clone());
            }
            tiers
        }
    };

    let name = catalog.generate_role_name(&tiers);
    RoleDefinition::new(name, tiers).with_origin(RoleOrigin::Recombined)
}
