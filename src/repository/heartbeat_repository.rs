use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::Heartbeat,
    error::{AppError, Result},
    repository::HeartbeatRepository,
};

#[derive(FromRow)]
struct HeartbeatRow {
    id: String,
    message: String,
    created_at: NaiveDateTime,
}

pub struct SqliteHeartbeatRepository {
    pool: SqlitePool,
}

impl SqliteHeartbeatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_heartbeat(row: HeartbeatRow) -> Result<Heartbeat> {
        Ok(Heartbeat {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            message: row.message,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl HeartbeatRepository for SqliteHeartbeatRepository {
    async fn insert(&self, message: &str) -> Result<Heartbeat> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query("INSERT INTO heartbeat (id, message, created_at) VALUES (?, ?, ?)")
            .bind(&id_str)
            .bind(message)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let row = sqlx::query_as::<_, HeartbeatRow>(
            "SELECT id, message, created_at FROM heartbeat WHERE id = ?",
        )
        .bind(&id_str)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Self::row_to_heartbeat(row)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM heartbeat WHERE created_at < ?")
            .bind(cutoff.naive_utc())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
