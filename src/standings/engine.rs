//! League table computation
//!
//! The engine folds finished match results into per-team tallies and sorts
//! them into a ranked table. It is a pure function of its input: no store
//! access, no clock, and the table is rebuilt from scratch on every call.
//!
//! Callers must pass only validated results (see [`crate::matches`]):
//! distinct non-empty team ids and scores no greater than
//! [`crate::matches::MAX_GOALS`]. Counters saturate rather than wrap if a
//! caller passes larger values anyway.

use crate::error::Result;
use crate::standings::comparator::{NameComparator, OrdinalComparator};
use crate::standings::rules::StandingsRules;
use crate::standings::table::StandingsTable;
use crate::teams::TeamDirectory;
use crate::types::{MatchResult, StandingsRow, TeamId};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Running counters for one team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
}

impl Tally {
    /// Credit one match from this team's point of view
    fn credit(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);

        let outcome = match scored.cmp(&conceded) {
            Ordering::Greater => &mut self.wins,
            Ordering::Less => &mut self.losses,
            Ordering::Equal => &mut self.draws,
        };
        *outcome = outcome.saturating_add(1);
    }
}

type Tallies = BTreeMap<TeamId, Tally>;

/// Insert an all-zero tally for `team` if missing, then apply `update` to it
fn upsert(mut tallies: Tallies, team: &str, update: impl FnOnce(&mut Tally)) -> Tallies {
    match tallies.get_mut(team) {
        Some(tally) => update(tally),
        None => {
            let mut tally = Tally::default();
            update(&mut tally);
            tallies.insert(team.to_string(), tally);
        }
    }
    tallies
}

fn record_match(tallies: Tallies, result: &MatchResult) -> Tallies {
    let tallies = upsert(tallies, &result.home_team, |home| {
        home.credit(result.home_score, result.away_score)
    });
    upsert(tallies, &result.away_team, |away| {
        away.credit(result.away_score, result.home_score)
    })
}

/// Computes ranked league tables from finished matches
#[derive(Debug, Clone)]
pub struct StandingsEngine {
    rules: StandingsRules,
    comparator: Arc<dyn NameComparator>,
}

impl Default for StandingsEngine {
    fn default() -> Self {
        Self {
            rules: StandingsRules::default(),
            comparator: Arc::new(OrdinalComparator),
        }
    }
}

impl StandingsEngine {
    /// Create an engine with custom rules and name comparator
    pub fn new(rules: StandingsRules, comparator: Arc<dyn NameComparator>) -> Result<Self> {
        rules.validate()?;

        Ok(Self { rules, comparator })
    }

    pub fn rules(&self) -> &StandingsRules {
        &self.rules
    }

    /// Compute the table, using team ids as display names for the final tie-break
    pub fn compute<I>(&self, matches: I) -> StandingsTable
    where
        I: IntoIterator,
        I::Item: Borrow<MatchResult>,
    {
        self.compute_inner(matches, None)
    }

    /// Compute the table, resolving display names through `directory`
    ///
    /// Teams missing from the directory are ordered by their id.
    pub fn compute_with_directory<I>(
        &self,
        matches: I,
        directory: &dyn TeamDirectory,
    ) -> StandingsTable
    where
        I: IntoIterator,
        I::Item: Borrow<MatchResult>,
    {
        self.compute_inner(matches, Some(directory))
    }

    fn compute_inner<I>(&self, matches: I, directory: Option<&dyn TeamDirectory>) -> StandingsTable
    where
        I: IntoIterator,
        I::Item: Borrow<MatchResult>,
    {
        let mut match_count = 0usize;
        let tallies = matches.into_iter().fold(Tallies::new(), |tallies, result| {
            match_count += 1;
            record_match(tallies, result.borrow())
        });

        let mut rows: Vec<StandingsRow> = tallies
            .into_iter()
            .map(|(team, tally)| self.to_row(team, tally))
            .collect();

        rows.sort_by(|a, b| {
            self.rules
                .compare(a, b)
                .then_with(|| {
                    self.comparator
                        .compare(display_name(directory, &a.team), display_name(directory, &b.team))
                })
                .then_with(|| a.team.cmp(&b.team))
        });

        debug!(
            "Computed standings for {} teams from {} matches",
            rows.len(),
            match_count
        );

        StandingsTable::new(rows)
    }

    fn to_row(&self, team: TeamId, tally: Tally) -> StandingsRow {
        StandingsRow {
            team,
            played: tally.played,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            goals_for: tally.goals_for,
            goals_against: tally.goals_against,
            goal_differential: i64::from(tally.goals_for) - i64::from(tally.goals_against),
            points: self
                .rules
                .scoring
                .points_for(tally.wins, tally.draws, tally.losses),
        }
    }
}

fn display_name<'a>(directory: Option<&'a dyn TeamDirectory>, team: &'a str) -> &'a str {
    directory
        .and_then(|directory| directory.display_name(team))
        .unwrap_or(team)
}

/// Compute standings with the default 3/1/0 rules and code-point name ordering
pub fn compute_standings<I>(matches: I) -> Vec<StandingsRow>
where
    I: IntoIterator,
    I::Item: Borrow<MatchResult>,
{
    StandingsEngine::default().compute(matches).into_rows()
}
