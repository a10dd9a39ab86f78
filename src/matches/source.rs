//! Match sources
//!
//! A source hands out a full snapshot of the match collection on every call.
//! The standings feed re-validates and recomputes from each snapshot, so
//! sources never need to track what changed.

use crate::error::{Result, StandingsError};
use crate::types::MatchRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

/// Trait for fetching match documents
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Fetch the current snapshot of all match documents
    async fn fetch_matches(&self) -> Result<Vec<MatchRecord>>;
}

/// Source backed by an in-memory snapshot
#[derive(Debug, Default)]
pub struct InMemoryMatchSource {
    records: RwLock<Vec<MatchRecord>>,
}

impl InMemoryMatchSource {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Replace the whole snapshot
    pub async fn replace(&self, records: Vec<MatchRecord>) {
        *self.records.write().await = records;
    }

    /// Insert a record, replacing any existing record with the same id
    pub async fn upsert(&self, record: MatchRecord) {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Remove a record by id, returning whether it existed
    pub async fn remove(&self, match_id: &str) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != match_id);
        records.len() != before
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MatchSource for InMemoryMatchSource {
    async fn fetch_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.records.read().await.clone())
    }
}

/// Source reading a JSON array of match documents from disk
#[derive(Debug, Clone)]
pub struct JsonFileMatchSource {
    path: PathBuf,
}

impl JsonFileMatchSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl MatchSource for JsonFileMatchSource {
    async fn fetch_matches(&self) -> Result<Vec<MatchRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StandingsError::SourceUnavailable {
                message: format!("Failed to read {}: {}", self.path.display(), e),
            }
        })?;

        let records: Vec<MatchRecord> =
            serde_json::from_str(&contents).map_err(|e| StandingsError::SourceUnavailable {
                message: format!("Invalid match JSON in {}: {}", self.path.display(), e),
            })?;

        debug!(
            "Read {} match records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
