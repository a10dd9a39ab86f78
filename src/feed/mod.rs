//! Live standings feed
//!
//! The feed recomputes the whole table from a fresh match snapshot on every
//! refresh and publishes the result on a watch channel. There is no
//! incremental update path: each refresh is fetch, validate, compute.

use crate::error::{Result, StandingsError};
use crate::matches::{collect_eligible, MatchSource, SkippedRecord, ValidationPolicy};
use crate::standings::{StandingsEngine, StandingsTable};
use crate::teams::TeamDirectory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, Mutex};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

/// A published table together with how it was built
#[derive(Debug, Clone, Serialize)]
pub struct StandingsSnapshot {
    /// Incremented each time a different table is published; 0 before the first refresh
    pub revision: u64,
    pub table: StandingsTable,
    /// Match documents not yet finished
    pub not_finished: usize,
    /// Finished documents left out as malformed
    pub skipped: Vec<SkippedRecord>,
    pub computed_at: DateTime<Utc>,
}

impl StandingsSnapshot {
    fn empty() -> Self {
        Self {
            revision: 0,
            table: StandingsTable::default(),
            not_finished: 0,
            skipped: Vec::new(),
            computed_at: Utc::now(),
        }
    }

    fn same_content(
        &self,
        table: &StandingsTable,
        not_finished: usize,
        skipped: &[SkippedRecord],
    ) -> bool {
        self.revision > 0
            && &self.table == table
            && self.not_finished == not_finished
            && self.skipped == skipped
    }
}

/// Recomputes standings whenever asked and publishes them to subscribers
pub struct StandingsFeed {
    source: Arc<dyn MatchSource>,
    engine: StandingsEngine,
    directory: Arc<dyn TeamDirectory>,
    policy: ValidationPolicy,
    sender: watch::Sender<Arc<StandingsSnapshot>>,
    refresh_lock: Mutex<()>,
}

impl StandingsFeed {
    pub fn new(
        source: Arc<dyn MatchSource>,
        engine: StandingsEngine,
        directory: Arc<dyn TeamDirectory>,
        policy: ValidationPolicy,
    ) -> Self {
        let (sender, _) = watch::channel(Arc::new(StandingsSnapshot::empty()));

        Self {
            source,
            engine,
            directory,
            policy,
            sender,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<StandingsSnapshot>> {
        self.sender.subscribe()
    }

    /// Stream of snapshots, starting with the current one
    pub fn updates(&self) -> WatchStream<Arc<StandingsSnapshot>> {
        WatchStream::new(self.sender.subscribe())
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Arc<StandingsSnapshot> {
        self.sender.borrow().clone()
    }

    /// Fetch, validate and recompute, publishing the table if it changed
    ///
    /// On error nothing is published and the previous snapshot stays current.
    pub async fn refresh(&self) -> Result<Arc<StandingsSnapshot>> {
        let _guard = self.refresh_lock.lock().await;

        let records = self.source.fetch_matches().await?;
        let eligibility = collect_eligible(&records, self.policy)?;
        let table = self
            .engine
            .compute_with_directory(&eligibility.results, self.directory.as_ref());

        let current = self.latest();
        if current.same_content(&table, eligibility.not_finished, &eligibility.skipped) {
            debug!("Standings unchanged at revision {}", current.revision);
            return Ok(current);
        }

        let snapshot = Arc::new(StandingsSnapshot {
            revision: current.revision + 1,
            table,
            not_finished: eligibility.not_finished,
            skipped: eligibility.skipped,
            computed_at: Utc::now(),
        });

        info!(
            "Published standings revision {} ({} teams, {} matches)",
            snapshot.revision,
            snapshot.table.len(),
            eligibility.results.len()
        );

        self.sender.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    /// Refresh on a fixed interval until a shutdown signal arrives
    ///
    /// A failed refresh is logged and retried on the next tick.
    pub async fn run(
        &self,
        interval: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<()> {
        if interval.is_zero() {
            return Err(StandingsError::ConfigurationError {
                message: "Poll interval must be greater than 0".to_string(),
            }
            .into());
        }

        let mut ticker = tokio::time::interval(interval);
        info!("Standings feed polling every {:?}", interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh().await {
                        warn!("Standings refresh failed: {}", e);
                    }
                }
                _ = shutdown.recv() => {
                    info!("Standings feed shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Wait for the next snapshot published after the last one seen by `receiver`
pub async fn next_snapshot(
    receiver: &mut watch::Receiver<Arc<StandingsSnapshot>>,
) -> Result<Arc<StandingsSnapshot>> {
    receiver
        .changed()
        .await
        .map_err(|_| StandingsError::FeedClosed)?;
    Ok(receiver.borrow_and_update().clone())
}
