//! Error types for the standings service
//!
//! Domain failures are a `thiserror` enum; fallible functions return
//! `anyhow::Result` so callers can downcast to [`StandingsError`] or add context.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific standings scenarios
#[derive(Debug, thiserror::Error)]
pub enum StandingsError {
    #[error("Invalid match record {match_id}: {reason}")]
    InvalidRecord { match_id: String, reason: String },

    #[error("Duplicate team in directory: {team_id}")]
    DuplicateTeam { team_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Match source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Standings feed closed")]
    FeedClosed,
}

impl StandingsError {
    /// Shorthand for an invalid record error
    pub fn invalid_record(match_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            match_id: match_id.into(),
            reason: reason.into(),
        }
    }
}
