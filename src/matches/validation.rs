//! Boundary validation of match documents
//!
//! Raw documents come out of the match store loosely typed. This module
//! turns finished ones into [`MatchResult`] values the engine can trust and
//! decides, per [`ValidationPolicy`], what happens to malformed ones.

use crate::error::{Result, StandingsError};
use crate::types::{MatchId, MatchRecord, MatchResult, MatchStatus, TeamId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Highest goal count accepted for one side of a match
pub const MAX_GOALS: u32 = 999;

/// What to do with a finished match document that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Log and leave the record out of the table
    #[default]
    Skip,
    /// Abort with the first invalid record
    Reject,
}

impl std::str::FromStr for ValidationPolicy {
    type Err = StandingsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(ValidationPolicy::Skip),
            "reject" | "strict" => Ok(ValidationPolicy::Reject),
            other => Err(StandingsError::ConfigurationError {
                message: format!("Unknown validation policy: {}", other),
            }),
        }
    }
}

impl std::fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationPolicy::Skip => write!(f, "skip"),
            ValidationPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// A finished record that was left out under [`ValidationPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub match_id: MatchId,
    pub reason: String,
}

/// Outcome of filtering a batch of match documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Validated finished matches
    pub results: Vec<MatchResult>,
    /// Records not in the finished state
    pub not_finished: usize,
    /// Finished records dropped for being malformed
    pub skipped: Vec<SkippedRecord>,
}

fn team_id(
    record: &MatchRecord,
    team: &Option<TeamId>,
    side: &str,
) -> std::result::Result<TeamId, StandingsError> {
    match team.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(StandingsError::invalid_record(
            &record.id,
            format!("missing {} team", side),
        )),
    }
}

/// Coerce a loosely typed score into a goal count
fn parse_score(value: &Value) -> std::result::Result<u32, String> {
    let number = match value {
        Value::Null => return Err("score is missing".to_string()),
        Value::Number(number) => {
            if let Some(goals) = number.as_u64() {
                return goal_count(goals);
            }
            number
                .as_f64()
                .ok_or_else(|| format!("score {} is not a number", number))?
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err("score is missing".to_string());
            }
            text.parse::<f64>()
                .map_err(|_| format!("score {:?} is not a number", text))?
        }
        other => return Err(format!("score {} is not a number", other)),
    };

    if !number.is_finite() {
        return Err(format!("score {} is not finite", number));
    }
    if number < 0.0 {
        return Err(format!("score {} is negative", number));
    }
    if number.fract() != 0.0 {
        return Err(format!("score {} is not a whole number", number));
    }
    if number > f64::from(MAX_GOALS) {
        return Err(format!("score {} out of range", number));
    }

    goal_count(number as u64)
}

fn goal_count(goals: u64) -> std::result::Result<u32, String> {
    match u32::try_from(goals) {
        Ok(goals) if goals <= MAX_GOALS => Ok(goals),
        _ => Err(format!("score {} out of range", goals)),
    }
}

impl TryFrom<&MatchRecord> for MatchResult {
    type Error = StandingsError;

    fn try_from(record: &MatchRecord) -> std::result::Result<Self, Self::Error> {
        if record.status != MatchStatus::Finished {
            return Err(StandingsError::invalid_record(
                &record.id,
                format!("match is {}, not finished", record.status),
            ));
        }

        let home_team = team_id(record, &record.home_team, "home")?;
        let away_team = team_id(record, &record.away_team, "away")?;
        if home_team == away_team {
            return Err(StandingsError::invalid_record(
                &record.id,
                format!("team {} cannot play itself", home_team),
            ));
        }

        let score = record
            .score
            .as_ref()
            .ok_or_else(|| StandingsError::invalid_record(&record.id, "score is missing"))?;

        let home_score = parse_score(&score.home)
            .map_err(|reason| StandingsError::invalid_record(&record.id, format!("home {}", reason)))?;
        let away_score = parse_score(&score.away)
            .map_err(|reason| StandingsError::invalid_record(&record.id, format!("away {}", reason)))?;

        Ok(MatchResult {
            home_team,
            away_team,
            home_score,
            away_score,
        })
    }
}

/// Keep the finished, well-formed matches of a snapshot
///
/// Matches in any state other than finished are excluded without error.
/// Malformed finished matches are handled according to `policy`.
pub fn collect_eligible(records: &[MatchRecord], policy: ValidationPolicy) -> Result<Eligibility> {
    let mut eligibility = Eligibility::default();

    for record in records {
        if record.status != MatchStatus::Finished {
            if record.status.is_terminal() {
                debug!("Excluding {} match {}", record.status, record.id);
            }
            eligibility.not_finished += 1;
            continue;
        }

        match MatchResult::try_from(record) {
            Ok(result) => eligibility.results.push(result),
            Err(error) => match policy {
                ValidationPolicy::Reject => return Err(error.into()),
                ValidationPolicy::Skip => {
                    warn!("Skipping match record: {}", error);
                    let reason = match error {
                        StandingsError::InvalidRecord { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    eligibility.skipped.push(SkippedRecord {
                        match_id: record.id.clone(),
                        reason,
                    });
                }
            },
        }
    }

    debug!(
        "Collected {} eligible matches ({} not finished, {} skipped)",
        eligibility.results.len(),
        eligibility.not_finished,
        eligibility.skipped.len()
    );

    Ok(eligibility)
}
