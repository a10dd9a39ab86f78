//! Team directory interface and in-memory implementation

use crate::error::{Result, StandingsError};
use crate::types::{Team, TeamId};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Lookup of team metadata by id
pub trait TeamDirectory: Send + Sync {
    /// Display name for a team, if the team is listed
    fn display_name(&self, team: &str) -> Option<&str>;

    /// Full record for a team
    fn team(&self, team: &str) -> Option<&Team>;
}

/// Directory held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamDirectory {
    teams: HashMap<TeamId, Team>,
}

impl InMemoryTeamDirectory {
    /// Build a directory, rejecting duplicate ids
    pub fn new(teams: Vec<Team>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(teams.len());

        for team in teams {
            if by_id.contains_key(&team.id) {
                return Err(StandingsError::DuplicateTeam { team_id: team.id }.into());
            }
            by_id.insert(team.id.clone(), team);
        }

        Ok(Self { teams: by_id })
    }

    /// Parse a JSON array of teams
    pub fn from_json(json: &str) -> Result<Self> {
        let teams: Vec<Team> = serde_json::from_str(json).context("Invalid team directory JSON")?;
        Self::new(teams)
    }

    /// Load a JSON array of teams from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read team directory {}", path.display()))?;
        let directory = Self::from_json(&contents)?;

        info!(
            "Loaded {} teams from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl TeamDirectory for InMemoryTeamDirectory {
    fn display_name(&self, team: &str) -> Option<&str> {
        self.teams.get(team).map(|team| team.name.as_str())
    }

    fn team(&self, team: &str) -> Option<&Team> {
        self.teams.get(team)
    }
}
