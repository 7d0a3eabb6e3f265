//! Fitness-weighted selection and tier ordering
pub mod tier;
pub mod weights;

pub use self::tier::resolve_tier_order;
pub use self::weights::{
    behavior_selection_weight, pick_role_id_weighted, role_selection_weight, weighted_pick_index,
};
