//! Behavior units - named, reusable agent capabilities
//!
//! The engine never runs a behavior. It stores the capability, tracks how
//! well it performs, and hands it back to the executor in role order.

pub mod hooks;

use std::sync::Arc;

use cogsguard_common::BehaviorId;
use serde::{Deserialize, Serialize};

/// Category a behavior belongs to
///
/// Purely descriptive, apart from driving the vibe mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorSource {
    /// Shared by every role (explore, recharge)
    Common,
    /// Resource gathering
    Miner,
    /// Map discovery
    Scout,
    /// Charger alignment
    Aligner,
    /// Enemy charger disruption
    Scrambler,
}

impl std::fmt::Display for BehaviorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BehaviorSource::Common => write!(f, "common"),
            BehaviorSource::Miner => write!(f, "miner"),
            BehaviorSource::Scout => write!(f, "scout"),
            BehaviorSource::Aligner => write!(f, "aligner"),
            BehaviorSource::Scrambler => write!(f, "scrambler"),
        }
    }
}

/// The start / act / terminate triple an executor runs for a behavior
///
/// `Ctx` is the executor's per-agent state and `Act` its action type. Both
/// are opaque to the engine.
pub trait Capability<Ctx, Act>: Send + Sync {
    /// Whether the behavior may start in this state
    fn can_start(&self, ctx: &Ctx) -> bool;

    /// Produce the next action, or `None` when there is nothing to do
    fn act(&self, ctx: &mut Ctx) -> Option<Act>;

    /// Whether a running behavior should hand control back
    fn should_terminate(&self, ctx: &Ctx) -> bool;
}

/// Shared handle to a capability
pub type SharedCapability<Ctx, Act> = Arc<dyn Capability<Ctx, Act>>;

type Predicate<Ctx> = Box<dyn Fn(&Ctx) -> bool + Send + Sync>;
type ActFn<Ctx, Act> = Box<dyn Fn(&mut Ctx) -> Option<Act> + Send + Sync>;

/// Capability assembled from three closures
pub struct FnCapability<Ctx, Act> {
    can_start: Predicate<Ctx>,
    act: ActFn<Ctx, Act>,
    should_terminate: Predicate<Ctx>,
}

impl<Ctx, Act> FnCapability<Ctx, Act> {
    pub fn new(
        can_start: impl Fn(&Ctx) -> bool + Send + Sync + 'static,
        act: impl Fn(&mut Ctx) -> Option<Act> + Send + Sync + 'static,
        should_terminate: impl Fn(&Ctx) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            can_start: Box::new(can_start),
            act: Box::new(act),
            should_terminate: Box::new(should_terminate),
        }
    }
}

impl<Ctx, Act> Capability<Ctx, Act> for FnCapability<Ctx, Act> {
    fn can_start(&self, ctx: &Ctx) -> bool {
        (self.can_start)(ctx)
    }

    fn act(&self, ctx: &mut Ctx) -> Option<Act> {
        (self.act)(ctx)
    }

    fn should_terminate(&self, ctx: &Ctx) -> bool {
        (self.should_terminate)(ctx)
    }
}

/// Capability that can always start and never acts
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCapability;

impl<Ctx, Act> Capability<Ctx, Act> for NoopCapability {
    fn can_start(&self, _ctx: &Ctx) -> bool {
        true
    }

    fn act(&self, _ctx: &mut Ctx) -> Option<Act> {
        None
    }

    fn should_terminate(&self, _ctx: &Ctx) -> bool {
        false
    }
}

/// A behavior registered in the catalog
pub struct BehaviorUnit<Ctx, Act> {
    /// Dense id assigned at insertion
    pub id: BehaviorId,
    /// Unique name within the catalog
    pub name: String,
    /// Descriptive category
    pub source: BehaviorSource,
    /// Whether higher-priority behaviors may pre-empt this one
    pub interruptible: bool,
    /// Number of score observations
    pub games: u32,
    /// EMA fitness (0-1)
    pub fitness: f64,
    capability: SharedCapability<Ctx, Act>,
}

impl<Ctx, Act> BehaviorUnit<Ctx, Act> {
    pub(crate) fn new(
        id: BehaviorId,
        name: String,
        source: BehaviorSource,
        interruptible: bool,
        capability: SharedCapability<Ctx, Act>,
    ) -> Self {
        Self {
            id,
            name,
            source,
            interruptible,
            games: 0,
            fitness: 0.0,
            capability,
        }
    }

    /// The capability handed to the executor
    pub fn capability(&self) -> &SharedCapability<Ctx, Act> {
        &self.capability
    }

    #[inline]
    pub fn can_start(&self, ctx: &Ctx) -> bool {
        self.capability.can_start(ctx)
    }

    #[inline]
    pub fn act(&self, ctx: &mut Ctx) -> Option<Act> {
        self.capability.act(ctx)
    }

    #[inline]
    pub fn should_terminate(&self, ctx: &Ctx) -> bool {
        self.capability.should_terminate(ctx)
    }
}

impl<Ctx, Act> Clone for BehaviorUnit<Ctx, Act> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            source: self.source,
            interruptible: self.interruptible,
            games: self.games,
            fitness: self.fitness,
            capability: Arc::clone(&self.capability),
        }
    }
}

impl<Ctx, Act> std::fmt::Debug for BehaviorUnit<Ctx, Act> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorUnit")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("source", &self.source)
            .field("interruptible", &self.interruptible)
            .field("games", &self.games)
            .field("fitness", &self.fitness)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_capability_forwards() {
        let cap: FnCapability<u32, &'static str> = FnCapability::new(
            |n| *n > 0,
            |n| {
                *n -= 1;
                Some("step")
            },
            |n| *n == 0,
        );

        let mut ctx = 1;
        assert!(cap.can_start(&ctx));
        assert_eq!(cap.act(&mut ctx), Some("step"));
        assert_eq!(ctx, 0);
        assert!(cap.should_terminate(&ctx));
    }

    #[test]
    fn test_unit_clone_shares_capability() {
        let unit: BehaviorUnit<(), ()> = BehaviorUnit::new(
            BehaviorId(0),
            "explore".into(),
            BehaviorSource::Common,
            true,
            Arc::new(NoopCapability),
        );
        let copy = unit.clone();
        assert!(Arc::ptr_eq(unit.capability(), copy.capability()));
        assert_eq!(copy.games, 0);
        assert_eq!(copy.fitness, 0.0);
        assert!(format!("{:?}", copy).contains("explore"));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(BehaviorSource::Scrambler.to_string(), "scrambler");
        let json = serde_json::to_string(&BehaviorSource::Miner).unwrap();
        assert_eq!(json, "\"miner\"");
    }
}
