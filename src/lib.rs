//! Class League - standings engine for school class sports tournaments
//!
//! This crate turns finished match documents into ranked league tables,
//! with boundary validation of raw documents, a team directory for display
//! names, and a feed that recomputes the table whenever matches change.

pub mod config;
pub mod error;
pub mod feed;
pub mod matches;
pub mod standings;
pub mod teams;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Result, StandingsError};
pub use types::*;

// Re-export key components
pub use feed::{StandingsFeed, StandingsSnapshot};
pub use matches::{collect_eligible, MatchSource, ValidationPolicy};
pub use standings::{compute_standings, StandingsEngine, StandingsTable};
pub use teams::{InMemoryTeamDirectory, TeamDirectory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
