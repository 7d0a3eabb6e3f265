//! Late-bound behavior hooks
//!
//! Seeded behaviors are registered before the executor exists. Their `act`
//! resolves through a shared table keyed by behavior name, so the executor
//! can install concrete logic afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::Capability;

/// Action hook installed by the executor
pub type ActHook<Ctx, Act> = Arc<dyn Fn(&mut Ctx) -> Option<Act> + Send + Sync>;

/// Shared map of behavior name to action hook
pub struct HookTable<Ctx, Act> {
    hooks: Arc<RwLock<HashMap<String, ActHook<Ctx, Act>>>>,
}

impl<Ctx, Act> HookTable<Ctx, Act> {
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Install or replace the hook for a behavior name
    pub fn install(
        &self,
        name: impl Into<String>,
        hook: impl Fn(&mut Ctx) -> Option<Act> + Send + Sync + 'static,
    ) {
        self.hooks.write().insert(name.into(), Arc::new(hook));
    }

    /// Remove a hook, returns whether one was present
    pub fn remove(&self, name: &str) -> bool {
        self.hooks.write().remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<ActHook<Ctx, Act>> {
        self.hooks.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }
}

impl<Ctx, Act> Default for HookTable<Ctx, Act> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, Act> Clone for HookTable<Ctx, Act> {
    fn clone(&self) -> Self {
        Self {
            hooks: Arc::clone(&self.hooks),
        }
    }
}

/// Capability whose action is looked up by name at call time
///
/// Can always start and never terminates on its own. Acts as a no-op until a
/// hook is installed under its name.
pub struct HookedCapability<Ctx, Act> {
    name: String,
    table: HookTable<Ctx, Act>,
}

impl<Ctx, Act> HookedCapability<Ctx, Act> {
    pub fn new(name: impl Into<String>, table: HookTable<Ctx, Act>) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<Ctx, Act> Capability<Ctx, Act> for HookedCapability<Ctx, Act> {
    fn can_start(&self, _ctx: &Ctx) -> bool {
        true
    }

    fn act(&self, ctx: &mut Ctx) -> Option<Act> {
        // Clone the hook out so the lock is not held while it runs
        let hook = self.table.get(&self.name)?;
        hook(ctx)
    }

    fn should_terminate(&self, _ctx: &Ctx) -> bool {
        false
    }
}
