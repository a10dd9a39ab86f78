//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! class-league service, including environment variable and TOML loading
//! and validation.

use crate::matches::ValidationPolicy;
use crate::standings::{
    comparator_for_locale, ScoringRules, StandingsEngine, StandingsRules, TieBreaker,
};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub standings: StandingsSettings,
    pub feed: FeedSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// How tables are scored and ordered
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingsSettings {
    pub win_points: u32,
    pub draw_points: u32,
    pub loss_points: u32,
    /// Numeric criteria applied before the name tie-break
    pub tie_breakers: Vec<TieBreaker>,
    /// Locale of team display names; empty or "ordinal" for code-point order
    pub locale: String,
    /// Compare digit runs in names by value
    pub numeric_collation: bool,
    /// What to do with malformed finished matches
    pub validation: ValidationPolicy,
}

/// Where match and team data come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// JSON file with the match documents
    pub matches_path: PathBuf,
    /// Optional JSON file with the team directory
    pub teams_path: Option<PathBuf>,
    /// Poll interval for watch mode in seconds
    pub poll_interval_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "class-league".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StandingsSettings {
    fn default() -> Self {
        let rules = StandingsRules::default();
        Self {
            win_points: rules.scoring.win,
            draw_points: rules.scoring.draw,
            loss_points: rules.scoring.loss,
            tie_breakers: rules.tie_breakers,
            locale: "he-IL".to_string(),
            numeric_collation: false,
            validation: ValidationPolicy::Skip,
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            matches_path: PathBuf::from("matches.json"),
            teams_path: None,
            poll_interval_seconds: 30,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Invalid TOML configuration")?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Standings settings
        if let Ok(points) = env::var("WIN_POINTS") {
            self.standings.win_points = parse_var("WIN_POINTS", &points)?;
        }
        if let Ok(points) = env::var("DRAW_POINTS") {
            self.standings.draw_points = parse_var("DRAW_POINTS", &points)?;
        }
        if let Ok(points) = env::var("LOSS_POINTS") {
            self.standings.loss_points = parse_var("LOSS_POINTS", &points)?;
        }
        if let Ok(tie_breakers) = env::var("TIE_BREAKERS") {
            self.standings.tie_breakers = tie_breakers
                .split(',')
                .filter(|item| !item.trim().is_empty())
                .map(|item| item.parse::<TieBreaker>().map_err(anyhow::Error::from))
                .collect::<Result<Vec<_>>>()?;
        }
        if let Ok(locale) = env::var("STANDINGS_LOCALE") {
            self.standings.locale = locale;
        }
        if let Ok(numeric) = env::var("NUMERIC_COLLATION") {
            self.standings.numeric_collation = parse_var("NUMERIC_COLLATION", &numeric)?;
        }
        if let Ok(policy) = env::var("VALIDATION_POLICY") {
            self.standings.validation = policy.parse()?;
        }

        // Feed settings
        if let Ok(path) = env::var("MATCHES_PATH") {
            self.feed.matches_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("TEAMS_PATH") {
            self.feed.teams_path = Some(PathBuf::from(path));
        }
        if let Ok(interval) = env::var("POLL_INTERVAL_SECONDS") {
            self.feed.poll_interval_seconds = parse_var("POLL_INTERVAL_SECONDS", &interval)?;
        }

        Ok(())
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.feed.poll_interval_seconds)
    }

    /// Scoring and tie-break rules described by this configuration
    pub fn standings_rules(&self) -> StandingsRules {
        StandingsRules {
            scoring: ScoringRules {
                win: self.standings.win_points,
                draw: self.standings.draw_points,
                loss: self.standings.loss_points,
            },
            tie_breakers: self.standings.tie_breakers.clone(),
        }
    }

    /// Build a standings engine from the configured rules and locale
    pub fn build_engine(&self) -> Result<StandingsEngine> {
        StandingsEngine::new(
            self.standings_rules(),
            comparator_for_locale(&self.standings.locale, self.standings.numeric_collation),
        )
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate standings rules
    config.standings_rules().validate()?;

    // Validate feed settings
    if config.feed.matches_path.as_os_str().is_empty() {
        return Err(anyhow!("Matches path cannot be empty"));
    }
    if config.feed.poll_interval_seconds == 0 {
        return Err(anyhow!("Poll interval must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.standings.win_points, 3);
        assert_eq!(config.standings.draw_points, 1);
        assert_eq!(config.standings.loss_points, 0);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [service]
            log_level = "debug"

            [standings]
            win_points = 2
            tie_breakers = ["points", "wins", "goal_differential"]
            validation = "reject"

            [feed]
            matches_path = "data/matches.json"
            teams_path = "data/teams.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "class-league");
        assert_eq!(config.standings.win_points, 2);
        assert_eq!(config.standings.draw_points, 1);
        assert_eq!(
            config.standings.tie_breakers,
            vec![TieBreaker::Points, TieBreaker::Wins, TieBreaker::GoalDifferential]
        );
        assert_eq!(config.standings.validation, ValidationPolicy::Reject);
        assert_eq!(config.feed.teams_path, Some(PathBuf::from("data/teams.json")));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AppConfig::from_toml("[standings]\nwin_points = \"many\"").is_err());
        assert!(AppConfig::from_toml("[standings]\ntie_breakers = [\"coin_toss\"]").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.standings.draw_points = 3;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.feed.poll_interval_seconds = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.standings.tie_breakers = vec![TieBreaker::GoalsFor, TieBreaker::GoalsFor];
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.standings.win_points = 1_000_000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_tie_breakers_without_leading_points_rejected() {
        let config = AppConfig::from_toml("[standings]\ntie_breakers = []").unwrap();
        assert!(validate_config(&config).is_err());
        assert!(config.build_engine().is_err());

        let config = AppConfig::from_toml("[standings]\ntie_breakers = [\"goals_for\"]").unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_build_engine() {
        let mut config = AppConfig::default();
        config.standings.win_points = 2;

        let engine = config.build_engine().unwrap();
        assert_eq!(
            engine.rules().scoring,
            ScoringRules {
                win: 2,
                draw: 1,
                loss: 0
            }
        );
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<u32>("WIN_POINTS", " 4 ").unwrap(), 4);
        assert!(parse_var::<u32>("WIN_POINTS", "four").is_err());
    }
}
