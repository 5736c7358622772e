//! Error types for the Riftbound advisor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid hand size: expected {expected} cards, got {actual}")]
    InvalidHandSize { expected: usize, actual: usize },

    #[error("Invalid lane count: a match has exactly 2 lanes, got {0}")]
    InvalidLaneCount(usize),

    #[error("Unknown phase '{0}' (expected: mulligan, main, combat, showdown, end)")]
    UnknownPhase(String),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid ability pattern: {0}")]
    InvalidPattern(#[from] regex_lite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
