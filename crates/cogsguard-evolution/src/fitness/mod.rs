//! Fitness tracking: f = f × (1 - α) + s × α
pub mod tracker;

pub use self::tracker::{
    ema_update, lock_role_name_if_fit, record_behavior_score, record_behavior_score_weighted,
    record_role_score, record_role_score_weighted, FitnessTracker,
};
