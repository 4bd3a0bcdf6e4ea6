// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::domain::{MatchId, RoundId};

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Round not found: {0}")]
    UnknownRound(RoundId),

    #[error("Match not found: {0}")]
    UnknownMatch(MatchId),

    #[error("Cyclic round dependency: {0}")]
    DependencyCycle(String),

    #[error("Round '{0}' has no predecessors and no phase, and no default phase is configured")]
    MissingDefaultPhase(RoundId),

    #[error("Date out of range: {0}")]
    DateOverflow(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ScheduleError>;
