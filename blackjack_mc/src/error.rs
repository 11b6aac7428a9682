use thiserror::Error;

use crate::{simulation::GamePhase, Decision};

/// Errors that can occur while simulating rounds.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("policy {policy} returned {decision:?}, expected Hit or Stand")]
    InvalidAction { policy: String, decision: Decision },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{method} is only allowed in {expected:?} phase, but round is in {actual:?} phase")]
    PhaseViolation {
        method: &'static str,
        expected: GamePhase,
        actual: GamePhase,
    },
}
