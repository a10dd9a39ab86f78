//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use class_league::error::Result;
use class_league::matches::MatchSource;
use class_league::teams::InMemoryTeamDirectory;
use class_league::types::{MatchRecord, MatchResult, MatchStatus, RawScore, Team};
use mockall::mock;
use serde_json::json;

mock! {
    pub Source {}

    #[async_trait]
    impl MatchSource for Source {
        async fn fetch_matches(&self) -> Result<Vec<MatchRecord>>;
    }
}

/// Teams of the tenth-grade league
pub fn tenth_grade_teams() -> Vec<Team> {
    vec![
        Team::new("10-1", "י'1"),
        Team::new("10-2", "י'2"),
        Team::new("10-3", "י'3"),
        Team::new("10-4", "י'4"),
        // Listed but never plays a finished match.
        Team::new("10-5", "י'5"),
    ]
}

pub fn tenth_grade_directory() -> InMemoryTeamDirectory {
    InMemoryTeamDirectory::new(tenth_grade_teams()).expect("fixture teams are unique")
}

/// A season snapshot as exported from the match collection
///
/// Finished results:
///   10-1 3-1 10-2, 10-3 0-0 10-4, 10-2 2-2 10-3, 10-4 1-2 10-1, 10-3 4-1 10-1
pub fn tenth_grade_season() -> Vec<MatchRecord> {
    let mut live = MatchRecord::finished("m6", "10-2", "10-4", 1, 0);
    live.status = MatchStatus::Live;

    let mut canceled = MatchRecord::scheduled("m7", "10-5", "10-1");
    canceled.status = MatchStatus::Canceled;

    let mut string_scores = MatchRecord::finished("m5", "10-3", "10-1", 0, 0);
    string_scores.score = Some(RawScore {
        home: json!("4"),
        away: json!("1"),
    });

    let mut missing_score = MatchRecord::finished("m9", "10-5", "10-2", 0, 0);
    missing_score.score = Some(RawScore {
        home: json!(null),
        away: json!(2),
    });

    vec![
        MatchRecord::finished("m1", "10-1", "10-2", 3, 1),
        MatchRecord::finished("m2", "10-3", "10-4", 0, 0),
        MatchRecord::finished("m3", "10-2", "10-3", 2, 2),
        MatchRecord::finished("m4", "10-4", "10-1", 1, 2),
        string_scores,
        live,
        canceled,
        MatchRecord::scheduled("m8", "10-5", "10-4"),
        missing_score,
    ]
}

/// Shorthand for a validated result
pub fn result(home: &str, away: &str, home_score: u32, away_score: u32) -> MatchResult {
    MatchResult::new(home, away, home_score, away_score)
}
