//! Scoring and tie-break rules for a tournament
//!
//! Defaults follow the soccer convention used by the school league: three
//! points for a win, one for a draw, none for a loss, ties broken by goal
//! differential and then goals scored.

use crate::error::{Result, StandingsError};
use crate::types::StandingsRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Upper bound on points awarded for a single outcome
pub const MAX_POINTS_PER_MATCH: u32 = 100;

/// Points awarded per match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

impl ScoringRules {
    /// Points earned by a given record, saturating at `u32::MAX`
    pub fn points_for(&self, wins: u32, draws: u32, losses: u32) -> u32 {
        wins.saturating_mul(self.win)
            .saturating_add(draws.saturating_mul(self.draw))
            .saturating_add(losses.saturating_mul(self.loss))
    }

    /// Validate that a win is worth more than a draw, and a draw no less than a loss
    pub fn validate(&self) -> Result<()> {
        if self.win > MAX_POINTS_PER_MATCH {
            return Err(StandingsError::ConfigurationError {
                message: format!(
                    "Win points ({}) must not exceed {}",
                    self.win, MAX_POINTS_PER_MATCH
                ),
            }
            .into());
        }

        if self.win <= self.draw {
            return Err(StandingsError::ConfigurationError {
                message: format!(
                    "Win points ({}) must be greater than draw points ({})",
                    self.win, self.draw
                ),
            }
            .into());
        }

        if self.draw < self.loss {
            return Err(StandingsError::ConfigurationError {
                message: format!(
                    "Draw points ({}) must not be less than loss points ({})",
                    self.draw, self.loss
                ),
            }
            .into());
        }

        Ok(())
    }
}

/// Numeric criteria applied, in order, before the name tie-break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    Points,
    GoalDifferential,
    GoalsFor,
    /// Lower is better.
    GoalsAgainst,
    Wins,
}

impl TieBreaker {
    /// Compare two rows so that the better row sorts first
    pub fn compare(&self, a: &StandingsRow, b: &StandingsRow) -> Ordering {
        match self {
            TieBreaker::Points => b.points.cmp(&a.points),
            TieBreaker::GoalDifferential => b.goal_differential.cmp(&a.goal_differential),
            TieBreaker::GoalsFor => b.goals_for.cmp(&a.goals_for),
            TieBreaker::GoalsAgainst => a.goals_against.cmp(&b.goals_against),
            TieBreaker::Wins => b.wins.cmp(&a.wins),
        }
    }
}

impl std::str::FromStr for TieBreaker {
    type Err = StandingsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "points" => Ok(TieBreaker::Points),
            "goal_differential" | "gd" => Ok(TieBreaker::GoalDifferential),
            "goals_for" | "gf" => Ok(TieBreaker::GoalsFor),
            "goals_against" | "ga" => Ok(TieBreaker::GoalsAgainst),
            "wins" => Ok(TieBreaker::Wins),
            other => Err(StandingsError::ConfigurationError {
                message: format!("Unknown tie-breaker: {}", other),
            }),
        }
    }
}

/// Full ranking rules: scoring plus tie-break order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRules {
    pub scoring: ScoringRules,
    pub tie_breakers: Vec<TieBreaker>,
}

impl Default for StandingsRules {
    fn default() -> Self {
        Self {
            scoring: ScoringRules::default(),
            tie_breakers: vec![
                TieBreaker::Points,
                TieBreaker::GoalDifferential,
                TieBreaker::GoalsFor,
            ],
        }
    }
}

impl StandingsRules {
    /// Points must be the first criterion; the rest refine it
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        if self.tie_breakers.first() != Some(&TieBreaker::Points) {
            return Err(StandingsError::ConfigurationError {
                message: format!(
                    "Tie-breakers must start with points, got {:?}",
                    self.tie_breakers
                ),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for tie_breaker in &self.tie_breakers {
            if !seen.insert(tie_breaker) {
                return Err(StandingsError::ConfigurationError {
                    message: format!("Tie-breaker {:?} listed more than once", tie_breaker),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Apply the numeric criteria in order, stopping at the first that separates the rows
    pub fn compare(&self, a: &StandingsRow, b: &StandingsRow) -> Ordering {
        self.tie_breakers
            .iter()
            .map(|tie_breaker| tie_breaker.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}
