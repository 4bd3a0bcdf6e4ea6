// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

use crate::types::SchedulingMode;

/// Command-line arguments for `smartschedule`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "smartschedule",
    version,
    about = "Compute start times for every round and match of a tournament stage.",
    long_about = None
)]
pub struct CliArgs {
    /// Stage export to schedule (TOML, or JSON with a `.json` extension).
    #[arg(long, value_name = "PATH")]
    pub stage: PathBuf,

    /// Schedule policy file (TOML).
    ///
    /// If omitted, defaults come from the stage type and phases are seeded
    /// at `--start`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start date for seeded phases (RFC 3339). Default: now.
    #[arg(long, value_name = "RFC3339")]
    pub start: Option<DateTime<Utc>>,

    /// Override the scheduling mode (direct, daily, weekly, monthly, days).
    #[arg(long, value_name = "MODE")]
    pub mode: Option<SchedulingMode>,

    /// Spacing in days for `--mode days` (1-14).
    #[arg(long, value_name = "N")]
    pub days: Option<u32>,

    /// Append match dates as JSON lines to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SMARTSCHEDULE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the round structure, but don't schedule.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
