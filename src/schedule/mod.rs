// src/schedule/mod.rs

//! Date resolution for rounds.
//!
//! - [`cadence`] turns a predecessor's date into the next round's date.
//! - [`scheduler`] walks the structure backward from its terminal rounds.
//! - [`phases`] seeds and edits the phase anchors a run starts from.

pub mod cadence;
pub mod phases;
pub mod scheduler;

pub use cadence::Cadence;
pub use phases::{add_phase, can_add_phase, remove_phase, seed_phases};
pub use scheduler::{RoundScheduler, ScheduleSummary};
