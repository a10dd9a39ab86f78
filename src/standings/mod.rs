//! League standings computation
//!
//! This module turns finished match results into a ranked league table,
//! with configurable scoring and an injectable name comparator for the
//! final tie-break.

pub mod comparator;
pub mod engine;
pub mod rules;
pub mod table;

// Re-export commonly used types
pub use comparator::{comparator_for_locale, LocaleCollator, NameComparator, OrdinalComparator};
pub use engine::{compute_standings, StandingsEngine};
pub use rules::{ScoringRules, StandingsRules, TieBreaker};
pub use table::{StandingsTable, TableTotals};
