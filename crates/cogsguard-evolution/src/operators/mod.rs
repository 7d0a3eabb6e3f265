//! Evolutionary operators
//!
//! Each operator is a function of `(catalog, inputs, rng)` that returns a new
//! unregistered role. None of them mutate existing roles, and every id they
//! emit is a valid index into the catalog's behavior list.

pub mod materialize;
pub mod mutate;
pub mod recombine;
pub mod sample;

pub use self::materialize::materialize_role_behaviors;
pub use self::mutate::mutate_role;
pub use self::recombine::recombine_roles;
pub use self::sample::sample_role;

#[cfg(test)]
pub(crate) mod testing {
    use crate::behavior::{BehaviorSource, NoopCapability};
    use crate::catalog::Catalog;
    use crate::role::{RoleDefinition, RoleTier};
    use cogsguard_common::BehaviorId;

    pub const SCENARIO_BEHAVIORS: [&str; 5] = ["explore", "mine", "deposit", "attack", "defend"];

    pub fn scenario_catalog() -> Catalog<(), ()> {
        let mut catalog = Catalog::new();
        for name in SCENARIO_BEHAVIORS {
            catalog.add_behavior(name, BehaviorSource::Common, NoopCapability);
        }
        catalog
    }

    /// deposit -> mine -> explore
    pub fn test_miner() -> RoleDefinition {
        RoleDefinition::new(
            "TestMiner",
            vec![
                RoleTier::fixed(vec![BehaviorId(2)]),
                RoleTier::fixed(vec![BehaviorId(1)]),
                RoleTier::fixed(vec![BehaviorId(0)]),
            ],
        )
    }
}
