// src/apply/runner.rs

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::apply::backend::ScheduleBackend;
use crate::apply::plan::ApplyPlan;
use crate::domain::MatchId;

/// Progress tick sent after each match, skipped ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyProgress {
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: Vec<MatchId>,
    pub skipped: Vec<MatchId>,
    /// Matches the backend rejected, with the error text.
    pub failed: Vec<(MatchId, String)>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Deliver `plan` to `backend`, one match at a time.
///
/// Backend errors are logged and recorded; the next match is still sent.
/// A closed progress receiver is ignored.
pub async fn apply_schedule<B>(
    plan: &ApplyPlan,
    backend: &mut B,
    progress: Option<mpsc::Sender<ApplyProgress>>,
) -> ApplyReport
where
    B: ScheduleBackend + ?Sized,
{
    let total = plan.total();
    let mut done = 0;
    let mut report = ApplyReport::default();

    info!(
        total,
        skipped = plan.skipped.len(),
        "applying schedule"
    );

    for assignment in &plan.assignments {
        match backend.schedule_match(assignment).await {
            Ok(()) => report.applied.push(assignment.match_id.clone()),
            Err(e) => {
                warn!(
                    match_id = %assignment.match_id,
                    error = %e,
                    "failed to apply match date"
                );
                report
                    .failed
                    .push((assignment.match_id.clone(), e.to_string()));
            }
        }
        done += 1;
        send_progress(progress.as_ref(), done, total).await;
    }

    for match_id in &plan.skipped {
        warn!(match_id = %match_id, "match has no date; skipped");
        report.skipped.push(match_id.clone());
        done += 1;
        send_progress(progress.as_ref(), done, total).await;
    }

    info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "apply finished"
    );
    report
}

async fn send_progress(progress: Option<&mpsc::Sender<ApplyProgress>>, done: usize, total: usize) {
    if let Some(tx) = progress {
        let _ = tx.send(ApplyProgress { done, total }).await;
    }
}
