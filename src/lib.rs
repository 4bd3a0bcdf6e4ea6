// src/lib.rs

pub mod apply;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ingest;
pub mod logging;
pub mod review;
pub mod schedule;
pub mod structure;
pub mod types;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::apply::{
    apply_schedule, build_apply_plan, ApplyProgress, ApplyReport, JsonLinesBackend, StdoutBackend,
};
use crate::cli::CliArgs;
use crate::config::{
    build_schedule_config, load_and_validate_stage, load_schedule_from_path, validate_schedule_config,
    RawScheduleFile,
};
use crate::domain::ScheduleConfig;
use crate::review::review_rows;
use crate::schedule::seed_phases;
use crate::structure::TournamentStructure;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - stage and schedule file loading
/// - structure construction and phase seeding
/// - the scheduling run and review table
/// - the apply sequence (stdout or JSON lines)
pub async fn run(args: CliArgs) -> Result<()> {
    let stage = load_and_validate_stage(&args.stage)?;
    let raw_schedule = match &args.config {
        Some(path) => load_schedule_from_path(path)?,
        None => RawScheduleFile::default(),
    };

    let (_, default_bracket) = stage.defaults();
    let bracket_type = raw_schedule.schedule.bracket_type.unwrap_or(default_bracket);
    let stage_type = stage.stage_type.clone();
    let stage_name = stage.name.clone();

    let mut structure =
        TournamentStructure::new(stage.rounds, stage.groups, stage.matches, bracket_type);

    // Policy checks run once, after CLI overrides and seeding.
    let mut config = build_schedule_config(raw_schedule, &structure, &stage_type)?;
    apply_overrides(&mut config, &args);
    if config.phases.is_empty() {
        let start = args.start.unwrap_or_else(Utc::now);
        config.phases = seed_phases(&structure, start);
    } else if let Some(start) = args.start {
        warn!(
            %start,
            phases = config.phases.len(),
            "--start ignored: the schedule file already defines phases"
        );
    }
    validate_schedule_config(&config, &structure)?;

    if args.dry_run {
        print_dry_run(stage_name.as_deref(), &structure, &config);
        return Ok(());
    }

    let summary = structure.schedule_tournament(&config)?;
    debug!(?summary, "schedule resolved");

    println!("Schedule review:");
    for row in review_rows(&structure) {
        println!("  {row}");
    }
    println!();

    let plan = build_apply_plan(&structure);

    let (progress_tx, mut progress_rx) = mpsc::channel::<ApplyProgress>(64);
    let progress_log = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            debug!(done = progress.done, total = progress.total, "apply progress");
        }
    });

    let report: ApplyReport = match &args.output {
        Some(path) => {
            info!(path = %path.display(), "writing match dates as JSON lines");
            let mut backend = JsonLinesBackend::new(path);
            apply_schedule(&plan, &mut backend, Some(progress_tx)).await
        }
        None => apply_schedule(&plan, &mut StdoutBackend, Some(progress_tx)).await,
    };
    progress_log.await?;

    if !report.is_success() {
        warn!(
            failed = report.failed.len(),
            "some matches could not be applied"
        );
    }

    Ok(())
}

/// `--mode` / `--days` win over the schedule file.
fn apply_overrides(config: &mut ScheduleConfig, args: &CliArgs) {
    if let Some(mode) = args.mode {
        config.scheduling_mode = mode;
    }
    if let Some(days) = args.days {
        config.days = days;
    }
}

/// Simple dry-run output: rounds, dependencies and phases.
fn print_dry_run(stage_name: Option<&str>, structure: &TournamentStructure, config: &ScheduleConfig) {
    println!("smartschedule dry-run");
    if let Some(name) = stage_name {
        println!("  stage = {name}");
    }
    println!("  bracket_type = {}", structure.bracket_type());
    println!("  scheduling_mode = {}", config.scheduling_mode);
    println!("  first rounds = {:?}", structure.first_round_ids());
    println!("  last rounds = {:?}", structure.last_round_ids());
    println!();

    println!("rounds ({}):", structure.rounds().len());
    for round in structure.rounds() {
        println!("  - {} ({})", round.id, round.name);
        println!("      round_length: {}", round.round_length);
        let preceding = structure.preceding_round_ids(&round.id);
        if !preceding.is_empty() {
            println!("      after: {preceding:?}");
        }
        if let Some(phase) = config.phase_for_round(&round.id) {
            let marker = if phase.is_default { " (default)" } else { "" };
            println!("      phase: {}{marker}", phase.start_date.to_rfc3339());
        }
    }

    debug!("dry-run complete (nothing scheduled)");
}
