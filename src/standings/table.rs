//! Computed league table
//!
//! Rank is not stored on a row: it is the row's 1-based position in the
//! sorted table.

use crate::types::StandingsRow;
use serde::{Deserialize, Serialize};

/// Sum of all counters across a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTotals {
    pub played: u64,
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
    pub goals_for: u64,
    pub goals_against: u64,
}

impl TableTotals {
    /// Whether the totals are consistent with a set of two-team matches
    ///
    /// Every win has a matching loss, every draw is credited twice, and all
    /// goals scored were conceded by someone.
    pub fn is_balanced(&self) -> bool {
        self.wins == self.losses
            && self.draws % 2 == 0
            && self.goals_for == self.goals_against
            && self.played == self.wins + self.draws + self.losses
    }

    /// Number of matches the table was built from
    pub fn matches(&self) -> u64 {
        self.played / 2
    }
}

/// Ordered standings rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    rows: Vec<StandingsRow>,
}

impl StandingsTable {
    /// Wrap rows that are already in rank order
    pub fn new(rows: Vec<StandingsRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StandingsRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<StandingsRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &StandingsRow)> {
        self.rows.iter().enumerate().map(|(index, row)| (index + 1, row))
    }

    /// 1-based rank of a team, if it has played
    pub fn position_of(&self, team: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.team == team)
            .map(|index| index + 1)
    }

    pub fn row(&self, team: &str) -> Option<&StandingsRow> {
        self.rows.iter().find(|row| row.team == team)
    }

    /// The team in first place
    pub fn leader(&self) -> Option<&StandingsRow> {
        self.rows.first()
    }

    pub fn totals(&self) -> TableTotals {
        self.rows
            .iter()
            .fold(TableTotals::default(), |mut totals, row| {
                totals.played += u64::from(row.played);
                totals.wins += u64::from(row.wins);
                totals.draws += u64::from(row.draws);
                totals.losses += u64::from(row.losses);
                totals.goals_for += u64::from(row.goals_for);
                totals.goals_against += u64::from(row.goals_against);
                totals
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::engine::StandingsEngine;
    use crate::types::MatchResult;

    fn sample_table() -> StandingsTable {
        StandingsEngine::default().compute([
            MatchResult::new("A", "B", 3, 0),
            MatchResult::new("B", "A", 2, 2),
            MatchResult::new("C", "B", 1, 0),
        ])
    }

    #[test]
    fn test_ranked_positions() {
        let table = sample_table();
        let ranks: Vec<(usize, &str)> = table
            .ranked()
            .map(|(rank, row)| (rank, row.team.as_str()))
            .collect();

        assert_eq!(ranks, vec![(1, "A"), (2, "C"), (3, "B")]);
        assert_eq!(table.position_of("C"), Some(2));
        assert_eq!(table.position_of("Z"), None);
        assert_eq!(table.leader().map(|row| row.team.as_str()), Some("A"));
    }

    #[test]
    fn test_row_lookup() {
        let table = sample_table();
        let b = table.row("B").unwrap();
        assert_eq!(b.played, 3);
        assert_eq!(b.losses, 2);
        assert!(table.row("Z").is_none());
    }

    #[test]
    fn test_totals_balanced() {
        let table = sample_table();
        let totals = table.totals();

        assert_eq!(totals.matches(), 3);
        assert_eq!(totals.wins, 2);
        assert_eq!(totals.losses, 2);
        assert_eq!(totals.draws, 2);
        assert!(totals.is_balanced());
    }

    #[test]
    fn test_empty_table() {
        let table = StandingsTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.leader().is_none());
        assert_eq!(table.totals(), TableTotals::default());
        assert!(table.totals().is_balanced());
    }
}
