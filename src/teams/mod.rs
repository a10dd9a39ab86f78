//! Team directory
//!
//! Maps team ids to display names. The standings engine consults it only for
//! the final name tie-break; the directory itself never decides which teams
//! appear in a table.

pub mod directory;

pub use directory::{InMemoryTeamDirectory, TeamDirectory};
