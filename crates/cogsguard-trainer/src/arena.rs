//! Synthetic CogsGuard arena
//!
//! Each agent walks its role's materialized behaviors top to bottom every
//! step and performs the first one that produces an action. Resources are
//! mined and deposited, chargers are discovered, aligned for the team, or
//! scrambled away from the opponent. The arena keeps the game loop honest
//! enough for fitness to mean something.

use anyhow::Result;
use cogsguard_common::AgentId;
use cogsguard_evolution::{BehaviorUnit, Coordinator, Vibe};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

const MAX_ENERGY: u32 = 20;
const CARGO_CAPACITY: u32 = 4;

/// Per-agent world view the behaviors act on
#[derive(Debug, Clone)]
pub struct AgentState {
    pub energy: u32,
    pub cargo: u32,
    pub deposited: u32,
    pub extractors_known: u32,
    pub stations_known: u32,
    pub chargers_known: u32,
    pub hearts: u32,
    pub influence: u32,
    pub aligned: u32,
    pub scrambled: u32,
    rng: ChaCha8Rng,
}

impl AgentState {
    pub fn new(seed: u64) -> Self {
        Self {
            energy: MAX_ENERGY,
            cargo: 0,
            deposited: 0,
            extractors_known: 0,
            stations_known: 0,
            chargers_known: 0,
            hearts: 0,
            influence: 0,
            aligned: 0,
            scrambled: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Spend energy, failing when the agent is drained
    fn spend(&mut self, cost: u32) -> bool {
        if self.energy < cost {
            return false;
        }
        self.energy -= cost;
        true
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Contribution to the team score, in [0, 1]
    pub fn score(&self) -> f64 {
        let raw = self.deposited as f64 * 0.05
            + self.aligned as f64 * 0.15
            + self.scrambled as f64 * 0.1
            + (self.stations_known + self.extractors_known + self.chargers_known) as f64 * 0.01;
        raw.clamp(0.0, 1.0)
    }
}

/// Action emitted by a behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArenaAction {
    Move,
    Recharge,
    Mine,
    Deposit,
    Discover,
    Collect,
    Align,
    Scramble,
    Idle,
}

/// Outcome of one game
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub game: u32,
    pub team_score: f64,
    pub won: bool,
    pub agent_scores: Vec<f64>,
    pub vibes: Vec<Vibe>,
    pub new_generation: bool,
}

/// Install arena logic for every seeded behavior
pub fn install_behavior_hooks(coordinator: &Coordinator<AgentState, ArenaAction>) {
    coordinator.set_behavior_hook("explore", |s: &mut AgentState| {
        s.spend(1).then_some(ArenaAction::Move)
    });
    coordinator.set_behavior_hook("recharge", |s: &mut AgentState| {
        if s.energy * 4 >= MAX_ENERGY || s.chargers_known == 0 {
            return None;
        }
        s.energy = MAX_ENERGY;
        Some(ArenaAction::Recharge)
    });
    coordinator.set_behavior_hook("mine_resource", |s: &mut AgentState| {
        if s.extractors_known == 0 || s.cargo >= CARGO_CAPACITY || !s.spend(1) {
            return None;
        }
        s.cargo += 1;
        Some(ArenaAction::Mine)
    });
    coordinator.set_behavior_hook("deposit_resource", |s: &mut AgentState| {
        if s.cargo < CARGO_CAPACITY || s.stations_known == 0 {
            return None;
        }
        s.deposited += s.cargo;
        s.cargo = 0;
        Some(ArenaAction::Deposit)
    });
    coordinator.set_behavior_hook("find_extractor", |s: &mut AgentState| {
        if s.extractors_known > 0 || !s.spend(1) {
            return None;
        }
        if s.chance(0.4) {
            s.extractors_known += 1;
        }
        Some(ArenaAction::Move)
    });
    coordinator.set_behavior_hook("discover_stations", |s: &mut AgentState| {
        discover(s, Landmark::Stations)
    });
    coordinator.set_behavior_hook("discover_extractors", |s: &mut AgentState| {
        discover(s, Landmark::Extractors)
    });
    coordinator.set_behavior_hook("discover_chargers", |s: &mut AgentState| {
        discover(s, Landmark::Chargers)
    });
    coordinator.set_behavior_hook("get_hearts", |s: &mut AgentState| {
        if s.hearts > 0 || s.stations_known == 0 || !s.spend(1) {
            return None;
        }
        s.hearts += 1;
        Some(ArenaAction::Collect)
    });
    coordinator.set_behavior_hook("get_influence", |s: &mut AgentState| {
        if s.influence > 0 || s.stations_known == 0 || !s.spend(1) {
            return None;
        }
        s.influence += 1;
        Some(ArenaAction::Collect)
    });
    coordinator.set_behavior_hook("align_charger", |s: &mut AgentState| {
        if s.hearts == 0 || s.influence == 0 || s.chargers_known == 0 || !s.spend(2) {
            return None;
        }
        s.hearts -= 1;
        s.influence -= 1;
        s.aligned += 1;
        Some(ArenaAction::Align)
    });
    coordinator.set_behavior_hook("find_enemy_charger", |s: &mut AgentState| {
        if s.chargers_known > 0 || !s.spend(1) {
            return None;
        }
        if s.chance(0.3) {
            s.chargers_known += 1;
        }
        Some(ArenaAction::Move)
    });
    coordinator.set_behavior_hook("scramble_charger", |s: &mut AgentState| {
        if s.hearts == 0 || s.chargers_known == 0 || !s.spend(2) {
            return None;
        }
        s.hearts -= 1;
        s.scrambled += 1;
        Some(ArenaAction::Scramble)
    });
}

#[derive(Debug, Clone, Copy)]
enum Landmark {
    Stations,
    Extractors,
    Chargers,
}

fn discover(s: &mut AgentState, landmark: Landmark) -> Option<ArenaAction> {
    let known = match landmark {
        Landmark::Stations => s.stations_known,
        Landmark::Extractors => s.extractors_known,
        Landmark::Chargers => s.chargers_known,
    };
    if known >= 2 || !s.spend(1) {
        return None;
    }
    if s.chance(0.5) {
        match landmark {
            Landmark::Stations => s.stations_known += 1,
            Landmark::Extractors => s.extractors_known += 1,
            Landmark::Chargers => s.chargers_known += 1,
        }
    }
    Some(ArenaAction::Discover)
}

/// One executor step: the first behavior that starts and acts wins
pub fn step(behaviors: &[BehaviorUnit<AgentState, ArenaAction>], state: &mut AgentState) -> ArenaAction {
    for behavior in behaviors {
        if behavior.should_terminate(state) || !behavior.can_start(state) {
            continue;
        }
        if let Some(action) = behavior.act(state) {
            return action;
        }
    }
    // Resting slowly restores energy
    state.energy = (state.energy + 1).min(MAX_ENERGY);
    ArenaAction::Idle
}

/// Repeated games against one coordinator
pub struct Arena {
    coordinator: Coordinator<AgentState, ArenaAction>,
    agents: u32,
    steps_per_game: u32,
    win_threshold: f64,
    seed: u64,
    games_played: u32,
}

impl Arena {
    pub fn new(
        coordinator: Coordinator<AgentState, ArenaAction>,
        agents: u32,
        steps_per_game: u32,
        win_threshold: f64,
        seed: u64,
    ) -> Self {
        install_behavior_hooks(&coordinator);
        Self {
            coordinator,
            agents,
            steps_per_game,
            win_threshold,
            seed,
            games_played: 0,
        }
    }

    pub fn coordinator(&self) -> &Coordinator<AgentState, ArenaAction> {
        &self.coordinator
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Play one game and feed the outcome back to the coordinator
    pub fn play_game(&mut self) -> Result<GameReport> {
        let game = self.games_played;
        let mut vibes = Vec::with_capacity(self.agents as usize);
        let mut loadouts = Vec::with_capacity(self.agents as usize);

        for agent in 0..self.agents {
            let agent_id = AgentId(agent);
            vibes.push(self.coordinator.choose_vibe(agent_id, 0)?);
            let behaviors = self.coordinator.get_role_behaviors(agent_id);
            let state_seed = self
                .seed
                .wrapping_mul(1_000_003)
                .wrapping_add(u64::from(game) << 16)
                .wrapping_add(u64::from(agent));
            loadouts.push((agent_id, behaviors, AgentState::new(state_seed)));
        }

        for _ in 0..self.steps_per_game {
            for (_, behaviors, state) in loadouts.iter_mut() {
                step(behaviors, state);
            }
        }

        let agent_scores: Vec<f64> = loadouts.iter().map(|(_, _, s)| s.score()).collect();
        let team_score = if agent_scores.is_empty() {
            0.0
        } else {
            agent_scores.iter().sum::<f64>() / agent_scores.len() as f64
        };
        let won = team_score >= self.win_threshold;

        for ((agent_id, _, _), score) in loadouts.iter().zip(&agent_scores) {
            self.coordinator.record_agent_performance(*agent_id, *score, won)?;
        }
        let new_generation = self.coordinator.end_game(won)?;
        self.games_played += 1;

        debug!(game, team_score, won, new_generation, "Game finished");
        Ok(GameReport {
            game,
            team_score,
            won,
            agent_scores,
            vibes,
            new_generation,
        })
    }
}
