//! CogsGuard Trainer Binary
//!
//! Evolves role populations in the synthetic arena and prints the final
//! catalog summary as JSON.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cogsguard_common::VERSION;
use cogsguard_evolution::Coordinator;
use cogsguard_trainer::{Arena, TrainerConfig};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting CogsGuard trainer v{}", VERSION);

    let config = TrainerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let coordinator =
        Coordinator::with_default_roles(config.evolution.clone(), config.generation.clone(), config.seed)?;
    let mut arena = Arena::new(
        coordinator,
        config.agents,
        config.steps_per_game,
        config.win_threshold,
        config.seed,
    );

    let mut wins = 0u32;
    for _ in 0..config.games {
        let report = arena.play_game()?;
        wins += u32::from(report.won);
        if report.new_generation {
            let summary = arena.coordinator().get_catalog_summary();
            info!(
                generation = summary.generation,
                roles = summary.num_roles,
                best = summary.best_role().map(|r| r.name.as_str()).unwrap_or("-"),
                "Generation complete"
            );
        }
    }

    info!(
        games = arena.games_played(),
        wins,
        generation = arena.coordinator().generation(),
        "Training finished"
    );

    println!("{}", arena.coordinator().get_catalog_summary().to_json()?);
    Ok(())
}
