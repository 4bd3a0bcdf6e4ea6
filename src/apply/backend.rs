// src/apply/backend.rs

//! Where resolved match dates are delivered.
//!
//! The apply sequence talks to a `ScheduleBackend` instead of a concrete
//! sink, so tests can record calls or inject failures.
//!
//! - `StdoutBackend` prints one tab-separated line per match.
//! - `JsonLinesBackend` appends one JSON object per match to a file.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::apply::plan::MatchAssignment;
use crate::errors::Result;

/// Persists one match date at a time.
pub trait ScheduleBackend: Send {
    /// Store `assignment`. The returned future resolves once the sink has
    /// acknowledged it.
    fn schedule_match(
        &mut self,
        assignment: &MatchAssignment,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Writes `match_id<TAB>rfc3339` lines to stdout.
#[derive(Debug, Default)]
pub struct StdoutBackend;

impl ScheduleBackend for StdoutBackend {
    fn schedule_match(
        &mut self,
        assignment: &MatchAssignment,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let line = format!(
            "{}\t{}\n",
            assignment.match_id,
            assignment.scheduled_at.to_rfc3339()
        );

        Box::pin(async move {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(line.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        })
    }
}

/// Appends each assignment as a JSON line to `path`.
#[derive(Debug, Clone)]
pub struct JsonLinesBackend {
    path: PathBuf,
}

impl JsonLinesBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleBackend for JsonLinesBackend {
    fn schedule_match(
        &mut self,
        assignment: &MatchAssignment,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let encoded = serde_json::to_string(assignment);
        let path = self.path.clone();

        Box::pin(async move {
            let mut line = encoded?;
            line.push('\n');

            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
            Ok(())
        })
    }
}
