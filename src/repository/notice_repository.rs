use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Notice, NoticeCandidate, NoticeCategory, NoticePriority},
    error::{AppError, Result},
    repository::NoticeRepository,
};

#[derive(FromRow)]
struct NoticeRow {
    id: String,
    title: String,
    content: String,
    category: String,
    priority: String,
    is_active: i32,
    published_at: NaiveDateTime,
    expires_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
}

pub struct SqliteNoticeRepository {
    pool: SqlitePool,
}

impl SqliteNoticeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_notice(row: NoticeRow) -> Result<Notice> {
        Ok(Notice {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            content: row.content,
            category: Self::parse_category(&row.category)?,
            priority: Self::parse_priority(&row.priority)?,
            is_active: row.is_active != 0,
            published_at: DateTime::from_naive_utc_and_offset(row.published_at, Utc),
            expires_at: row
                .expires_at
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_category(s: &str) -> Result<NoticeCategory> {
        match s {
            "examinations" => Ok(NoticeCategory::Examinations),
            "vacancy" => Ok(NoticeCategory::Vacancy),
            "admissions" => Ok(NoticeCategory::Admissions),
            "general" => Ok(NoticeCategory::General),
            _ => Err(AppError::Database(format!("Invalid notice category: {}", s))),
        }
    }

    fn parse_priority(s: &str) -> Result<NoticePriority> {
        match s {
            "low" => Ok(NoticePriority::Low),
            "normal" => Ok(NoticePriority::Normal),
            "high" => Ok(NoticePriority::High),
            "urgent" => Ok(NoticePriority::Urgent),
            _ => Err(AppError::Database(format!("Invalid notice priority: {}", s))),
        }
    }
}

#[async_trait]
impl NoticeRepository for SqliteNoticeRepository {
    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notices WHERE title = ?")
            .bind(title)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn insert_candidate(&self, candidate: &NoticeCandidate) -> Result<Option<Notice>> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let published_at_naive = candidate.published_at.naive_utc();
        let now = Utc::now().naive_utc();

        // Ingestion always writes normal priority, active, no expiry.
        let result = sqlx::query(
            r#"
            INSERT INTO notices (
                id, title, content, category, priority, is_active,
                published_at, expires_at, created_at
            ) VALUES (?, ?, ?, ?, 'normal', 1, ?, NULL, ?)
            ON CONFLICT(title) DO NOTHING
            "#,
        )
        .bind(&id_str)
        .bind(&candidate.title)
        .bind(&candidate.content)
        .bind(candidate.category.as_str())
        .bind(published_at_naive)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            SELECT id, title, content, category, priority, is_active,
                   published_at, expires_at, created_at
            FROM notices
            WHERE id = ?
            "#,
        )
        .bind(&id_str)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Some(Self::row_to_notice(row)?))
    }

    async fn list_active(&self) -> Result<Vec<Notice>> {
        let rows = sqlx::query_as::<_, NoticeRow>(
            r#"
            SELECT id, title, content, category, priority, is_active,
                   published_at, expires_at, created_at
            FROM notices
            WHERE is_active = 1
            ORDER BY published_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_notice).collect()
    }
}
