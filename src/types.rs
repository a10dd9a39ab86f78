//! Common types used throughout the standings service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a team (a school class)
pub type TeamId = String;

/// Identifier of a match document in the match store
pub type MatchId = String;

/// Lifecycle state of a match document
///
/// `scheduled -> live -> {finished | canceled}`. Only `Finished` matches
/// count towards the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl MatchStatus {
    /// Whether the match has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Canceled)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Live => write!(f, "live"),
            MatchStatus::Finished => write!(f, "finished"),
            MatchStatus::Canceled => write!(f, "canceled"),
            MatchStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Score block of a raw match document
///
/// Values are kept loosely typed: the store holds numbers, but older
/// documents were written from form inputs and carry numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    #[serde(default)]
    pub home: serde_json::Value,
    #[serde(default)]
    pub away: serde_json::Value,
}

/// A match document as stored, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    #[serde(default)]
    pub home_team: Option<TeamId>,
    #[serde(default)]
    pub away_team: Option<TeamId>,
    #[serde(alias = "state")]
    pub status: MatchStatus,
    #[serde(default)]
    pub score: Option<RawScore>,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tournament: Option<String>,
}

impl MatchRecord {
    /// Build a finished match record with numeric scores
    pub fn finished(
        id: impl Into<MatchId>,
        home_team: impl Into<TeamId>,
        away_team: impl Into<TeamId>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            id: id.into(),
            home_team: Some(home_team.into()),
            away_team: Some(away_team.into()),
            status: MatchStatus::Finished,
            score: Some(RawScore {
                home: serde_json::Value::from(home_score),
                away: serde_json::Value::from(away_score),
            }),
            kickoff: None,
            tournament: None,
        }
    }

    /// Build a match record that has not been played yet
    pub fn scheduled(
        id: impl Into<MatchId>,
        home_team: impl Into<TeamId>,
        away_team: impl Into<TeamId>,
    ) -> Self {
        Self {
            id: id.into(),
            home_team: Some(home_team.into()),
            away_team: Some(away_team.into()),
            status: MatchStatus::Scheduled,
            score: None,
            kickoff: None,
            tournament: None,
        }
    }
}

/// A validated, finished match outcome
///
/// This is the only input unit the standings engine consumes. Team ids are
/// non-empty and distinct; scores are non-negative integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchResult {
    pub fn new(
        home_team: impl Into<TeamId>,
        away_team: impl Into<TeamId>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score,
            away_score,
        }
    }

    /// Whether the match ended without a winner
    pub fn is_draw(&self) -> bool {
        self.home_score == self.away_score
    }
}

/// One team's aggregated line in the league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: TeamId,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_differential: i64,
    pub points: u32,
}

/// A team as listed in the team directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Grade level of the class, e.g. "10"
    #[serde(default)]
    pub grade: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade: None,
        }
    }
}
