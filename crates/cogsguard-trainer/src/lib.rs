//! # CogsGuard Trainer
//!
//! Drives a [`Coordinator`](cogsguard_evolution::Coordinator) through many
//! games of a small synthetic arena so role populations can be evolved and
//! inspected without the full game engine.

pub mod arena;
pub mod config;

pub use arena::{AgentState, Arena, ArenaAction, GameReport};
pub use config::TrainerConfig;
