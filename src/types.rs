// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Inter-round spacing rule used when a round is placed after its predecessors.
///
/// - `Direct`: start as soon as the preceding round's longest match is over.
/// - `Daily` / `Weekly` / `Monthly`: one calendar step after the predecessor.
/// - `Days`: a configurable number of days (see `ScheduleConfig::days`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    Direct,
    Daily,
    Weekly,
    Monthly,
    Days,
}

impl Default for SchedulingMode {
    fn default() -> Self {
        SchedulingMode::Direct
    }
}

impl FromStr for SchedulingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(SchedulingMode::Direct),
            "daily" => Ok(SchedulingMode::Daily),
            "weekly" => Ok(SchedulingMode::Weekly),
            "monthly" => Ok(SchedulingMode::Monthly),
            "days" => Ok(SchedulingMode::Days),
            other => Err(format!(
                "invalid scheduling mode: {other} (expected \"direct\", \"daily\", \"weekly\", \"monthly\" or \"days\")"
            )),
        }
    }
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchedulingMode::Direct => "direct",
            SchedulingMode::Daily => "daily",
            SchedulingMode::Weekly => "weekly",
            SchedulingMode::Monthly => "monthly",
            SchedulingMode::Days => "days",
        };
        f.write_str(s)
    }
}

/// How round order is derived for a stage.
///
/// - `Bracket`: elimination graph, order follows match-to-match progression.
/// - `Rounds`: pools / round-robin, rounds are sequential within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketType {
    Bracket,
    Rounds,
}

impl Default for BracketType {
    fn default() -> Self {
        BracketType::Bracket
    }
}

impl FromStr for BracketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bracket" => Ok(BracketType::Bracket),
            "rounds" => Ok(BracketType::Rounds),
            other => Err(format!(
                "invalid bracket type: {other} (expected \"bracket\" or \"rounds\")"
            )),
        }
    }
}

impl fmt::Display for BracketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketType::Bracket => f.write_str("bracket"),
            BracketType::Rounds => f.write_str("rounds"),
        }
    }
}

/// Default cadence and topology for a stage type as reported by the
/// tournament API (`single_elimination`, `pools`, `swiss`, ...).
///
/// Elimination formats are chained directly; everything else is played
/// weekly in parallel groups.
pub fn defaults_for_stage_type(stage_type: &str) -> (SchedulingMode, BracketType) {
    match stage_type.trim() {
        "single_elimination" | "double_elimination" | "gauntlet" | "ffa_single_elimination" => {
            (SchedulingMode::Direct, BracketType::Bracket)
        }
        _ => (SchedulingMode::Weekly, BracketType::Rounds),
    }
}
