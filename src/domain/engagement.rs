use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A keep-alive row. The hosted store suspends idle projects, so a scheduled
/// job writes one of these periodically to register activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heartbeat {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Site-wide visit counters, kept as a single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorStats {
    pub total_visits: i64,
    pub unique_visitors: i64,
}
