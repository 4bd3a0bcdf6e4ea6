// src/schedule/cadence.rs

use chrono::{DateTime, Duration, Months, Utc};

use crate::domain::ScheduleConfig;
use crate::errors::{Result, ScheduleError};
use crate::types::SchedulingMode;

/// Spacing rule applied when advancing from a predecessor's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Advance by the predecessor's match duration.
    Direct,
    Daily,
    Weekly,
    Monthly,
    /// Advance by a fixed number of calendar days.
    EveryDays(u32),
}

impl Cadence {
    pub fn from_config(config: &ScheduleConfig) -> Self {
        match config.scheduling_mode {
            SchedulingMode::Direct => Cadence::Direct,
            SchedulingMode::Daily => Cadence::Daily,
            SchedulingMode::Weekly => Cadence::Weekly,
            SchedulingMode::Monthly => Cadence::Monthly,
            SchedulingMode::Days => Cadence::EveryDays(config.days),
        }
    }

    /// Date a round starts when its latest predecessor starts at `from`.
    ///
    /// `preceding_round_length` is the game count of that predecessor's
    /// longest match; only Direct cadence looks at it.
    pub fn advance(
        &self,
        from: DateTime<Utc>,
        preceding_round_length: u32,
        config: &ScheduleConfig,
    ) -> Result<DateTime<Utc>> {
        let next = match self {
            Cadence::Direct => {
                let setting = config.match_length_for(preceding_round_length);
                from.checked_add_signed(Duration::minutes(i64::from(setting.match_length_min)))
            }
            Cadence::Daily => from.checked_add_signed(Duration::days(1)),
            Cadence::Weekly => from.checked_add_signed(Duration::weeks(1)),
            Cadence::Monthly => from.checked_add_months(Months::new(1)),
            Cadence::EveryDays(days) => from.checked_add_signed(Duration::days(i64::from(*days))),
        };

        next.ok_or_else(|| {
            ScheduleError::DateOverflow(format!("advancing {from} with {self:?} cadence"))
        })
    }
}
