//! Property-based tests for the standings engine.
//!
//! These tests verify table invariants hold under random match sets.

use class_league::standings::{
    compute_standings, LocaleCollator, NameComparator, StandingsEngine, StandingsRules,
};
use class_league::teams::{InMemoryTeamDirectory, TeamDirectory};
use class_league::types::{MatchResult, StandingsRow, Team};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

const TEAMS: [&str; 6] = ["10-1", "10-2", "10-3", "11-1", "11-2", "12-1"];

// Strategies for generating test data
fn match_strategy() -> impl Strategy<Value = MatchResult> {
    (0..TEAMS.len(), 1..TEAMS.len(), 0u32..8, 0u32..8).prop_map(
        |(home, offset, home_score, away_score)| {
            let away = (home + offset) % TEAMS.len();
            MatchResult::new(TEAMS[home], TEAMS[away], home_score, away_score)
        },
    )
}

fn season_strategy() -> impl Strategy<Value = Vec<MatchResult>> {
    prop::collection::vec(match_strategy(), 0..40)
}

fn shuffled_season_strategy() -> impl Strategy<Value = (Vec<MatchResult>, Vec<MatchResult>)> {
    season_strategy().prop_flat_map(|matches| (Just(matches.clone()), Just(matches).prop_shuffle()))
}

// Display names that sort differently from the ids; two classes share a
// name and 12-1 is missing from the directory.
fn hebrew_directory() -> InMemoryTeamDirectory {
    InMemoryTeamDirectory::new(vec![
        Team::new("10-1", "ענבל"),
        Team::new("10-2", "אורן"),
        Team::new("10-3", "ים"),
        Team::new("11-1", "אורן"),
        Team::new("11-2", "כיתה 10"),
    ])
    .unwrap()
}

fn hebrew_collator() -> LocaleCollator {
    LocaleCollator::new("he-IL").with_numeric(true)
}

fn hebrew_engine() -> StandingsEngine {
    StandingsEngine::new(StandingsRules::default(), Arc::new(hebrew_collator())).unwrap()
}

fn decisive(matches: &[MatchResult]) -> u32 {
    matches.iter().filter(|m| !m.is_draw()).count() as u32
}

fn sum(rows: &[StandingsRow], field: impl Fn(&StandingsRow) -> u32) -> u32 {
    rows.iter().map(field).sum()
}

proptest! {
    /// Every win has a matching loss and every draw is credited twice
    #[test]
    fn wins_losses_and_draws_are_conserved(matches in season_strategy()) {
        let rows = compute_standings(&matches);
        let decisive = decisive(&matches);

        prop_assert_eq!(sum(&rows, |row| row.wins), decisive);
        prop_assert_eq!(sum(&rows, |row| row.losses), decisive);
        prop_assert_eq!(sum(&rows, |row| row.draws) % 2, 0);
        prop_assert_eq!(sum(&rows, |row| row.played), 2 * matches.len() as u32);
    }

    /// Points follow the 3/1/0 formula and played counts add up
    #[test]
    fn points_match_formula(matches in season_strategy()) {
        for row in compute_standings(&matches) {
            prop_assert_eq!(row.points, row.wins * 3 + row.draws);
            prop_assert_eq!(row.played, row.wins + row.draws + row.losses);
        }
    }

    /// Goal differential is goals for minus goals against
    #[test]
    fn goal_differential_is_consistent(matches in season_strategy()) {
        let rows = compute_standings(&matches);
        for row in &rows {
            prop_assert_eq!(
                row.goal_differential,
                i64::from(row.goals_for) - i64::from(row.goals_against)
            );
        }
        prop_assert_eq!(sum(&rows, |row| row.goals_for), sum(&rows, |row| row.goals_against));
    }

    /// Input order never changes the table
    #[test]
    fn input_order_is_irrelevant((matches, shuffled) in shuffled_season_strategy()) {
        prop_assert_eq!(compute_standings(&matches), compute_standings(&shuffled));

        let mut reversed = matches.clone();
        reversed.reverse();
        prop_assert_eq!(compute_standings(&matches), compute_standings(&reversed));
    }

    /// Repeated computation yields the same order
    #[test]
    fn computation_is_deterministic(matches in season_strategy()) {
        let engine = StandingsEngine::default();
        prop_assert_eq!(engine.compute(&matches), engine.compute(&matches));
    }

    /// Rows are sorted by points, then goal differential, then goals for
    #[test]
    fn rows_are_sorted(matches in season_strategy()) {
        let rows = compute_standings(&matches);
        for pair in rows.windows(2) {
            let key = |row: &StandingsRow| (row.points, row.goal_differential, row.goals_for);
            prop_assert!(key(&pair[0]) >= key(&pair[1]));
            if key(&pair[0]) == key(&pair[1]) {
                prop_assert!(pair[0].team < pair[1].team);
            }
        }
    }

    /// Collated tables do not depend on input order either
    #[test]
    fn collated_input_order_is_irrelevant((matches, shuffled) in shuffled_season_strategy()) {
        let engine = hebrew_engine();
        let directory = hebrew_directory();

        let table = engine.compute_with_directory(&matches, &directory);
        prop_assert_eq!(&table, &engine.compute_with_directory(&shuffled, &directory));
        prop_assert_eq!(&table, &engine.compute_with_directory(&matches, &directory));
    }

    /// Level rows are ordered by collated display name, then by id
    #[test]
    fn collated_rows_are_sorted(matches in season_strategy()) {
        let directory = hebrew_directory();
        let collator = hebrew_collator();
        let table = hebrew_engine().compute_with_directory(&matches, &directory);

        for pair in table.rows().windows(2) {
            let key = |row: &StandingsRow| (row.points, row.goal_differential, row.goals_for);
            prop_assert!(key(&pair[0]) >= key(&pair[1]));
            if key(&pair[0]) == key(&pair[1]) {
                let name = |row: &StandingsRow| {
                    directory.display_name(&row.team).unwrap_or(&row.team).to_string()
                };
                match collator.compare(&name(&pair[0]), &name(&pair[1])) {
                    Ordering::Less => {}
                    Ordering::Equal => prop_assert!(pair[0].team < pair[1].team),
                    Ordering::Greater => prop_assert!(false, "rows out of name order"),
                }
            }
        }
    }

    /// Only teams that played appear, each exactly once
    #[test]
    fn only_participants_appear(matches in season_strategy()) {
        let rows = compute_standings(&matches);
        let mut teams: Vec<&str> = matches
            .iter()
            .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
            .collect();
        teams.sort_unstable();
        teams.dedup();

        let mut row_teams: Vec<&str> = rows.iter().map(|row| row.team.as_str()).collect();
        row_teams.sort_unstable();
        prop_assert_eq!(row_teams, teams);
    }
}

#[test]
fn empty_input_gives_empty_table() {
    assert!(compute_standings(Vec::<MatchResult>::new()).is_empty());
}
