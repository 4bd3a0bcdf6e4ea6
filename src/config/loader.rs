// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{RawScheduleFile, RawStageFile, StageFile};
use crate::errors::Result;

/// Read a stage file without validating it.
///
/// `.json` files are parsed as JSON; anything else as TOML.
pub fn load_stage_from_path(path: impl AsRef<Path>) -> Result<RawStageFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let stage: RawStageFile = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };

    debug!(
        path = %path.display(),
        rounds = stage.rounds.len(),
        matches = stage.matches.len(),
        "loaded stage file"
    );
    Ok(stage)
}

/// Read a stage file and check ids, references and acyclicity.
pub fn load_and_validate_stage(path: impl AsRef<Path>) -> Result<StageFile> {
    let raw = load_stage_from_path(path)?;
    StageFile::try_from(raw)
}

/// Read a schedule policy file (TOML).
///
/// Validation needs the stage it applies to; see
/// [`resolve_schedule`](crate::config::validate::resolve_schedule).
pub fn load_schedule_from_path(path: impl AsRef<Path>) -> Result<RawScheduleFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let schedule: RawScheduleFile = toml::from_str(&contents)?;

    debug!(
        path = %path.display(),
        phases = schedule.phase.len(),
        match_lengths = schedule.match_length.len(),
        "loaded schedule file"
    );
    Ok(schedule)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
