use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use smartschedule::apply::{MatchAssignment, ScheduleBackend};
use smartschedule::errors::{Result, ScheduleError};

/// A fake backend that:
/// - records every assignment it was asked to store, in call order
/// - rejects the match ids it was told to fail.
#[derive(Default)]
pub struct FakeBackend {
    applied: Arc<Mutex<Vec<MatchAssignment>>>,
    failing: HashSet<String>,
}

impl FakeBackend {
    pub fn new(applied: Arc<Mutex<Vec<MatchAssignment>>>) -> Self {
        Self {
            applied,
            failing: HashSet::new(),
        }
    }

    pub fn failing_on(mut self, match_id: &str) -> Self {
        self.failing.insert(match_id.to_string());
        self
    }
}

impl ScheduleBackend for FakeBackend {
    fn schedule_match(
        &mut self,
        assignment: &MatchAssignment,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let assignment = assignment.clone();
        let applied = Arc::clone(&self.applied);
        let fail = self.failing.contains(&assignment.match_id);

        Box::pin(async move {
            tokio::task::yield_now().await;
            if fail {
                return Err(ScheduleError::Other(anyhow::anyhow!(
                    "remote rejected match {}",
                    assignment.match_id
                )));
            }
            applied.lock().unwrap().push(assignment);
            Ok(())
        })
    }
}
