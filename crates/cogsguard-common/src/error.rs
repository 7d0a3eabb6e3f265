//! Error types for the CogsGuard engine
//!
//! Provides a unified error type for catalog, operator, and coordinator failures

use thiserror::Error;

use crate::types::ids::{AgentId, BehaviorId, RoleId};

/// Result type alias using EvolutionError
pub type Result<T> = std::result::Result<T, EvolutionError>;

/// Unified error type for CogsGuard operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    // Caller supplied a value the engine does not support
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation requires state that has not been established
    #[error("Precondition violated: {agent_id} has no active role assignment")]
    PreconditionViolated { agent_id: AgentId },

    // A role references a behavior outside the catalog
    #[error("Behavior id out of range: {behavior_id} (catalog holds {behavior_count} behaviors)")]
    BehaviorOutOfRange {
        behavior_id: BehaviorId,
        behavior_count: usize,
    },

    // Role lookup that must succeed did not
    #[error("Role not found: {0}")]
    RoleNotFound(RoleId),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EvolutionError {
    /// Shorthand for an unsupported tier selection mode
    pub fn unsupported_selection(mode: impl std::fmt::Display) -> Self {
        EvolutionError::InvalidArgument(format!("unsupported tier selection mode: {mode}"))
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for EvolutionError {
    fn from(err: serde_json::Error) -> Self {
        EvolutionError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for EvolutionError {
    fn from(err: anyhow::Error) -> Self {
        EvolutionError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvolutionError::PreconditionViolated { agent_id: AgentId(4) };
        assert!(err.to_string().contains("agent#4"));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = EvolutionError::BehaviorOutOfRange {
            behavior_id: BehaviorId(9),
            behavior_count: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("behavior#9"));
        assert!(msg.contains("5 behaviors"));
    }

    #[test]
    fn test_unsupported_selection_names_mode() {
        let err = EvolutionError::unsupported_selection("random");
        assert!(matches!(err, EvolutionError::InvalidArgument(_)));
        assert!(err.to_string().contains("random"));
    }
}
