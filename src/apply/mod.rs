// src/apply/mod.rs

//! Persisting resolved match dates.
//!
//! - [`plan`] turns a scheduled structure into an ordered list of
//!   (match, date) pairs.
//! - [`backend`] provides the `ScheduleBackend` trait and the shipped sinks.
//! - [`runner`] drives a plan through a backend sequentially and reports
//!   progress.

pub mod backend;
pub mod plan;
pub mod runner;

pub use backend::{JsonLinesBackend, ScheduleBackend, StdoutBackend};
pub use plan::{build_apply_plan, ApplyPlan, MatchAssignment};
pub use runner::{apply_schedule, ApplyProgress, ApplyReport};
