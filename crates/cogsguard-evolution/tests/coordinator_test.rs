//! Multi-generation runs through the public coordinator API

use cogsguard_common::{AgentId, EvolutionError};
use cogsguard_evolution::{
    CatalogSummary, Coordinator, EvolutionConfig, GenerationPolicy, RoleOrigin, Vibe,
};

const AGENTS: u32 = 4;

fn coordinator(seed: u64, games_per_generation: u32) -> Coordinator<u32, &'static str> {
    Coordinator::with_default_roles(
        EvolutionConfig::default(),
        GenerationPolicy {
            games_per_generation,
            ..Default::default()
        },
        seed,
    )
    .unwrap()
}

/// Plays `games` games where a role scores by how many miner behaviors it has
fn play(coord: &mut Coordinator<u32, &'static str>, games: u32) -> Vec<bool> {
    let mut turnovers = Vec::new();
    for game in 0..games {
        for agent in 0..AGENTS {
            let agent = AgentId(agent);
            let vibe = coord.choose_vibe(agent, u64::from(game) * 100).unwrap();
            let behaviors = coord.get_role_behaviors(agent);
            assert!(!behaviors.is_empty());
            let score = match vibe {
                Vibe::Miner => 0.9,
                Vibe::Gear => 0.2,
                _ => 0.4,
            };
            coord.record_agent_performance(agent, score, score > 0.5).unwrap();
        }
        turnovers.push(coord.end_game(game % 2 == 0).unwrap());
    }
    turnovers
}

fn summary_json(summary: &CatalogSummary) -> String {
    summary.to_json().unwrap()
}

#[test]
fn test_same_seed_same_run() {
    let mut a = coordinator(42, 5);
    let mut b = coordinator(42, 5);
    play(&mut a, 23);
    play(&mut b, 23);

    assert_eq!(
        summary_json(&a.get_catalog_summary()),
        summary_json(&b.get_catalog_summary())
    );
}

#[test]
fn test_generations_advance_on_boundary() {
    let mut coord = coordinator(7, 5);
    let turnovers = play(&mut coord, 12);

    let expected: Vec<bool> = (1..=12).map(|g| g % 5 == 0).collect();
    assert_eq!(turnovers, expected);
    assert_eq!(coord.generation(), 2);
    assert_eq!(coord.games_this_generation(), 2);

    let summary = coord.get_catalog_summary();
    assert_eq!(summary.generation, 2);
    assert_eq!(summary.num_behaviors, 13);
    assert!(summary.num_roles > 4);
    assert!(summary
        .roles
        .iter()
        .skip(4)
        .all(|r| r.origin != RoleOrigin::Manual));
}

#[test]
fn test_fitness_stays_in_bounds() {
    let mut coord = coordinator(11, 3);
    play(&mut coord, 15);

    for role in coord.catalog().roles() {
        assert!((0.0..=1.0).contains(&role.fitness));
        assert!(role.wins <= role.games);
    }
    assert!(coord.get_catalog_summary().best_role().is_some());
}

#[test]
fn test_assignments_cleared_between_generations() {
    let mut coord = coordinator(3, 1);
    coord.assign_role(AgentId(0), 0).unwrap();
    assert!(coord.end_game(true).unwrap());

    assert!(coord.get_agent_role(AgentId(0)).is_none());
    assert!(coord.get_role_behaviors(AgentId(0)).is_empty());
    let err = coord
        .record_agent_performance(AgentId(0), 0.5, false)
        .unwrap_err();
    assert!(matches!(err, EvolutionError::PreconditionViolated { .. }));
}
