// src/config/mod.rs

//! Input files for smartschedule.
//!
//! Responsibilities:
//! - Define the serde data model for stage and schedule files (`model.rs`).
//! - Load them from disk as TOML or JSON (`loader.rs`).
//! - Validate ids, references, round graph acyclicity and schedule policy
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate_stage, load_schedule_from_path, load_stage_from_path};
pub use model::{
    RawMatch, RawMatchLength, RawPhase, RawRound, RawScheduleFile, RawStageFile, ScheduleSection,
    StageFile, StageSection,
};
pub use validate::{build_schedule_config, resolve_schedule, validate_schedule_config};
