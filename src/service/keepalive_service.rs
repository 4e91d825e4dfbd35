use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{error::Result, repository::HeartbeatRepository};

/// Heartbeats older than this are swept on every run to keep the table
/// from growing without bound.
const HEARTBEAT_RETENTION_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy)]
pub struct KeepAliveReport {
    pub inserted: u64,
    pub deleted: u64,
    pub timestamp: DateTime<Utc>,
}

/// Writes a periodic activity row so the database never looks idle to the
/// hosting platform's usage metrics.
pub struct KeepAliveService {
    heartbeat_repo: Arc<dyn HeartbeatRepository>,
}

impl KeepAliveService {
    pub fn new(heartbeat_repo: Arc<dyn HeartbeatRepository>) -> Self {
        Self { heartbeat_repo }
    }

    pub async fn run(&self) -> Result<KeepAliveReport> {
        let now = Utc::now();

        let heartbeat = self.heartbeat_repo.insert("auto-activity").await?;
        tracing::info!(id = %heartbeat.id, "Inserted heartbeat record");

        let cutoff = now - Duration::days(HEARTBEAT_RETENTION_DAYS);
        // Sweep failure is not worth failing the run over.
        let deleted = match self.heartbeat_repo.delete_older_than(cutoff).await {
            Ok(deleted) => {
                tracing::info!(deleted, "Deleted old heartbeat records");
                deleted
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete old heartbeats");
                0
            }
        };

        Ok(KeepAliveReport {
            inserted: 1,
            deleted,
            timestamp: now,
        })
    }
}
