//! Evolutionary role coordinator
//!
//! The single stateful entry point. Per game the caller assigns roles,
//! records each agent's performance, then ends the game. Every
//! `games_per_generation` games the population is evolved and all
//! assignments are dropped.

pub mod generation;
pub mod summary;
pub mod vibe;

use std::collections::{BTreeMap, BTreeSet};

use cogsguard_common::{AgentId, BehaviorId, EvolutionError, Result, RoleId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::behavior::hooks::HookTable;
use crate::behavior::BehaviorUnit;
use crate::catalog::Catalog;
use crate::fitness::FitnessTracker;
use crate::operators::{materialize_role_behaviors, sample_role};
use crate::role::RoleDefinition;
use crate::seed::{seed_base_roles, seed_default_behaviors};
use crate::selection::pick_role_id_weighted;
use crate::EvolutionConfig;

pub use self::generation::{breed_cohort, breeding_pool, GenerationPolicy};
pub use self::summary::{CatalogSummary, RoleSummary};
pub use self::vibe::{vibe_for_role, Vibe};

/// An agent's role for the current generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAssignment {
    pub agent_id: AgentId,
    pub role_id: RoleId,
    pub assigned_at_step: u64,
    /// Raw scores recorded under this assignment, oldest first
    pub score_contributions: Vec<f64>,
}

impl AgentAssignment {
    pub fn new(agent_id: AgentId, role_id: RoleId, assigned_at_step: u64) -> Self {
        Self {
            agent_id,
            role_id,
            assigned_at_step,
            score_contributions: Vec::new(),
        }
    }

    pub fn mean_score(&self) -> Option<f64> {
        if self.score_contributions.is_empty() {
            return None;
        }
        Some(self.score_contributions.iter().sum::<f64>() / self.score_contributions.len() as f64)
    }
}

/// Coordinates evolutionary role selection across agents
pub struct Coordinator<Ctx, Act> {
    catalog: Catalog<Ctx, Act>,
    config: EvolutionConfig,
    policy: GenerationPolicy,
    tracker: FitnessTracker,
    hooks: HookTable<Ctx, Act>,
    rng: ChaCha8Rng,
    generation: u64,
    games_this_generation: u32,
    agent_assignments: BTreeMap<AgentId, AgentAssignment>,
}

impl<Ctx, Act> Coordinator<Ctx, Act> {
    /// Coordinator over an existing catalog
    ///
    /// All randomness flows from `seed`, so the same seed and call sequence
    /// reproduce a run exactly.
    pub fn new(
        catalog: Catalog<Ctx, Act>,
        config: EvolutionConfig,
        policy: GenerationPolicy,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        policy.validate()?;

        info!(
            behaviors = catalog.behavior_count(),
            roles = catalog.role_count(),
            seed,
            games_per_generation = policy.games_per_generation,
            "Coordinator initialized"
        );

        Ok(Self {
            catalog,
            tracker: FitnessTracker::from_config(&config),
            config,
            policy,
            hooks: HookTable::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            generation: 0,
            games_this_generation: 0,
            agent_assignments: BTreeMap::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog<Ctx, Act> {
        &self.catalog
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn games_this_generation(&self) -> u32 {
        self.games_this_generation
    }

    pub fn assignments(&self) -> &BTreeMap<AgentId, AgentAssignment> {
        &self.agent_assignments
    }

    pub fn assignment(&self, agent_id: AgentId) -> Option<&AgentAssignment> {
        self.agent_assignments.get(&agent_id)
    }

    /// Install the executor's action for a seeded behavior
    pub fn set_behavior_hook(
        &self,
        name: impl Into<String>,
        hook: impl Fn(&mut Ctx) -> Option<Act> + Send + Sync + 'static,
    ) {
        self.hooks.install(name, hook);
    }

    pub fn register_role(&mut self, role: RoleDefinition) -> Result<RoleId> {
        self.catalog.register_role(role)
    }

    /// Assign a fitness-weighted role among all registered roles
    ///
    /// Samples and registers a role first when the catalog has none.
    /// Re-assigning an agent replaces its previous assignment.
    pub fn assign_role(&mut self, agent_id: AgentId, step: u64) -> Result<&RoleDefinition> {
        if self.catalog.role_count() == 0 {
            let role = sample_role(&self.catalog, &self.config, &mut self.rng);
            self.catalog.register_role(role)?;
        }
        let candidates = self.catalog.role_ids();
        self.assign_role_among(agent_id, step, &candidates)
    }

    /// Assign a fitness-weighted role among `candidates`
    pub fn assign_role_among(
        &mut self,
        agent_id: AgentId,
        step: u64,
        candidates: &[RoleId],
    ) -> Result<&RoleDefinition> {
        if let Some(missing) = candidates.iter().find(|id| self.catalog.role(**id).is_none()) {
            return Err(EvolutionError::RoleNotFound(*missing));
        }
        let role_id = pick_role_id_weighted(&self.catalog, candidates, &mut self.rng)
            .ok_or_else(|| {
                EvolutionError::InvalidArgument(format!("no eligible roles for {agent_id}"))
            })?;

        self.agent_assignments
            .insert(agent_id, AgentAssignment::new(agent_id, role_id, step));

        let role = self.catalog.require_role(role_id)?;
        debug!(agent = %agent_id, role = %role.name, step, "Assigned role");
        Ok(role)
    }

    pub fn get_agent_role(&self, agent_id: AgentId) -> Option<&RoleDefinition> {
        self.agent_assignments
            .get(&agent_id)
            .and_then(|a| self.catalog.role(a.role_id))
    }

    /// Materialized behaviors of the agent's current role
    ///
    /// Empty when the agent has no assignment.
    pub fn get_role_behaviors(&mut self, agent_id: AgentId) -> Vec<BehaviorUnit<Ctx, Act>> {
        let Some(role) = self
            .agent_assignments
            .get(&agent_id)
            .and_then(|a| self.catalog.role(a.role_id))
        else {
            return Vec::new();
        };

        materialize_role_behaviors(&self.catalog, role, None, &mut self.rng)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn map_role_to_vibe(&self, role: &RoleDefinition) -> Vibe {
        vibe_for_role(&self.catalog, role)
    }

    /// Assign a role to the agent and return its vibe
    pub fn choose_vibe(&mut self, agent_id: AgentId, step: u64) -> Result<Vibe> {
        let role_id = self.assign_role(agent_id, step)?.id;
        let role = role_id
            .and_then(|id| self.catalog.role(id))
            .ok_or_else(|| EvolutionError::Internal(format!("{agent_id} assigned an unregistered role")))?;
        Ok(vibe_for_role(&self.catalog, role))
    }

    /// Record a score for the agent's current role
    ///
    /// Fails with `PreconditionViolated` when the agent has no assignment.
    pub fn record_agent_performance(&mut self, agent_id: AgentId, score: f64, won: bool) -> Result<()> {
        let assignment = self
            .agent_assignments
            .get_mut(&agent_id)
            .ok_or(EvolutionError::PreconditionViolated { agent_id })?;
        let role_id = assignment.role_id;

        let role = self
            .catalog
            .role_mut(role_id)
            .ok_or(EvolutionError::RoleNotFound(role_id))?;
        let locked = self.tracker.record_role(role, score, won);
        assignment.score_contributions.push(score);

        debug!(
            agent = %agent_id,
            role = %role.name,
            score,
            won,
            fitness = role.fitness,
            "Recorded performance"
        );
        if locked {
            info!(role = %role.name, fitness = role.fitness, "Role graduated, name locked");
        }

        if self.policy.credit_behaviors {
            let behavior_ids: BTreeSet<BehaviorId> = role.behavior_ids().collect();
            for id in behavior_ids {
                if let Some(behavior) = self.catalog.behavior_mut(id) {
                    self.tracker.record_behavior(behavior, score);
                }
            }
        }
        Ok(())
    }

    /// Count a finished game, evolving the population on a generation boundary
    ///
    /// Returns true when a new generation started.
    pub fn end_game(&mut self, won: bool) -> Result<bool> {
        self.games_this_generation += 1;
        debug!(
            generation = self.generation,
            games = self.games_this_generation,
            won,
            "Game ended"
        );

        if self.games_this_generation >= self.policy.games_per_generation {
            self.advance_generation()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn advance_generation(&mut self) -> Result<()> {
        let cohort = breed_cohort(&self.catalog, &self.config, &self.policy, &mut self.rng);
        let added = cohort.len();
        for role in cohort {
            self.catalog.register_role(role)?;
        }

        self.games_this_generation = 0;
        self.agent_assignments.clear();
        self.generation += 1;

        info!(
            generation = self.generation,
            added,
            population = self.catalog.role_count(),
            "Advanced generation"
        );
        Ok(())
    }

    pub fn get_catalog_summary(&self) -> CatalogSummary {
        CatalogSummary::capture(&self.catalog, self.generation, self.games_this_generation)
    }
}

impl<Ctx: 'static, Act: 'static> Coordinator<Ctx, Act> {
    /// Coordinator seeded with the standard behaviors and base roles
    ///
    /// Seeded behaviors act through [`Coordinator::set_behavior_hook`].
    pub fn with_default_roles(
        config: EvolutionConfig,
        policy: GenerationPolicy,
        seed: u64,
    ) -> Result<Self> {
        let mut coordinator = Self::new(Catalog::new(), config, policy, seed)?;
        let hooks = coordinator.hooks.clone();
        seed_default_behaviors(&mut coordinator.catalog, &hooks);
        seed_base_roles(&mut coordinator.catalog)?;
        Ok(coordinator)
    }
}
