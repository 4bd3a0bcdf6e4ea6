#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use smartschedule::domain::{Group, Match, MatchLengthSetting, MatchOpponent, Phase, Round, ScheduleConfig};
use smartschedule::structure::TournamentStructure;
use smartschedule::types::{BracketType, SchedulingMode};

/// `Utc` timestamp shorthand for tests.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

/// Builder for a `TournamentStructure` to simplify test setup.
///
/// Matches inherit the group of their round.
#[derive(Debug, Clone)]
pub struct StageBuilder {
    bracket_type: BracketType,
    groups: Vec<Group>,
    rounds: Vec<Round>,
    matches: Vec<Match>,
}

impl StageBuilder {
    pub fn new(bracket_type: BracketType) -> Self {
        Self {
            bracket_type,
            groups: Vec::new(),
            rounds: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Linear bracket: one group `g1`, round `ids[i]` holds match `m{i+1}`
    /// fed by the previous round's match.
    pub fn chain(ids: &[&str]) -> Self {
        let mut builder = Self::new(BracketType::Bracket).with_group("g1", "Main");
        for (pos, id) in ids.iter().enumerate() {
            builder = builder.with_round(id, "g1", pos as u32 + 1);
            let match_id = format!("m{}", pos + 1);
            if pos == 0 {
                builder = builder.with_match(&match_id, id, 1);
            } else {
                let source = format!("m{pos}");
                builder = builder.with_fed_match(&match_id, id, 1, &[source.as_str()]);
            }
        }
        builder
    }

    pub fn with_group(mut self, id: &str, name: &str) -> Self {
        let number = self.groups.len() as u32 + 1;
        self.groups.push(Group {
            id: id.to_string(),
            name: name.to_string(),
            number,
        });
        self
    }

    pub fn with_round(mut self, id: &str, group_id: &str, number: u32) -> Self {
        self.rounds
            .push(Round::new(id, group_id, format!("Round {number}"), number, 2));
        self
    }

    pub fn with_match(self, id: &str, round_id: &str, games: u32) -> Self {
        self.with_fed_match(id, round_id, games, &[])
    }

    /// Match whose opponent slots are fed by the `sources` matches.
    pub fn with_fed_match(mut self, id: &str, round_id: &str, games: u32, sources: &[&str]) -> Self {
        let group_id = self
            .rounds
            .iter()
            .find(|round| round.id == round_id)
            .map(|round| round.group_id.clone())
            .unwrap_or_else(|| "g1".to_string());

        let mut m = Match::new(id, round_id, group_id, games);
        m.opponents = sources
            .iter()
            .enumerate()
            .map(|(pos, source)| MatchOpponent {
                number: pos as u32 + 1,
                source_node_id: Some(source.to_string()),
                source_type: Some("winner".to_string()),
            })
            .collect();
        self.matches.push(m);
        self
    }

    pub fn with_match_date(mut self, id: &str, date: DateTime<Utc>) -> Self {
        if let Some(m) = self.matches.iter_mut().find(|m| m.id == id) {
            m.scheduled_at = Some(date);
        }
        self
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn build(self) -> TournamentStructure {
        TournamentStructure::new(self.rounds, self.groups, self.matches, self.bracket_type)
    }
}

/// Builder for `ScheduleConfig`.
#[derive(Debug, Clone)]
pub struct ScheduleConfigBuilder {
    config: ScheduleConfig,
}

impl ScheduleConfigBuilder {
    pub fn new(mode: SchedulingMode) -> Self {
        Self {
            config: ScheduleConfig::new(mode, BracketType::Bracket),
        }
    }

    pub fn bracket_type(mut self, bracket_type: BracketType) -> Self {
        self.config.bracket_type = bracket_type;
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.config.days = days;
        self
    }

    pub fn match_length(mut self, games: u32, minutes: u32) -> Self {
        self.config.match_length_settings.push(MatchLengthSetting {
            number_of_games: games,
            match_length_min: minutes,
        });
        self
    }

    /// Non-default phase anchoring `round_id`.
    pub fn phase(self, round_id: &str, group_id: &str, start: DateTime<Utc>) -> Self {
        self.push_phase(round_id, group_id, start, false)
    }

    /// Default phase anchoring `round_id`.
    pub fn default_phase(self, round_id: &str, group_id: &str, start: DateTime<Utc>) -> Self {
        self.push_phase(round_id, group_id, start, true)
    }

    fn push_phase(mut self, round_id: &str, group_id: &str, start: DateTime<Utc>, is_default: bool) -> Self {
        self.config.phases.push(Phase {
            group_id: group_id.to_string(),
            starting_round_id: round_id.to_string(),
            start_date: start,
            is_first: is_default,
            is_default,
        });
        self
    }

    pub fn build(self) -> ScheduleConfig {
        self.config
    }
}
