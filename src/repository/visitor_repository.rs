use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::VisitorStats,
    error::{AppError, Result},
    repository::VisitorRepository,
};

#[derive(FromRow)]
struct VisitorStatsRow {
    total_visits: i64,
    unique_visitors: i64,
}

pub struct SqliteVisitorRepository {
    pool: SqlitePool,
}

impl SqliteVisitorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitorRepository for SqliteVisitorRepository {
    async fn stats(&self) -> Result<VisitorStats> {
        // The stats table holds exactly one row, created by the migration.
        let row = sqlx::query_as::<_, VisitorStatsRow>(
            "SELECT total_visits, unique_visitors FROM visitor_stats WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(VisitorStats {
            total_visits: row.total_visits,
            unique_visitors: row.unique_visitors,
        })
    }

    async fn record_visit(&self, first_visit: bool) -> Result<VisitorStats> {
        let unique_increment = if first_visit { 1i64 } else { 0i64 };

        sqlx::query(
            r#"
            UPDATE visitor_stats
            SET total_visits = total_visits + 1,
                unique_visitors = unique_visitors + ?
            WHERE id = 1
            "#,
        )
        .bind(unique_increment)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.stats().await
    }
}
