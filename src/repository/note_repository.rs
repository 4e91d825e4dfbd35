use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::Note,
    error::{AppError, Result},
    repository::NoteRepository,
};

#[derive(FromRow)]
struct NoteRow {
    id: String,
    subject_id: String,
    title: String,
    description: Option<String>,
    file_url: String,
    file_name: String,
    file_size: Option<i64>,
    file_type: String,
    uploader_name: Option<String>,
    uploader_email: Option<String>,
    download_count: i64,
    rating_sum: i64,
    rating_count: i64,
    tags: String,
    is_verified: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_note(row: NoteRow) -> Result<Note> {
        // Tags are stored as a JSON array in a TEXT column.
        let tags: Vec<String> = serde_json::from_str(&row.tags)
            .map_err(|e| AppError::Database(format!("Invalid tags payload: {}", e)))?;

        Ok(Note {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            subject_id: Uuid::parse_str(&row.subject_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            file_url: row.file_url,
            file_name: row.file_name,
            file_size: row.file_size,
            file_type: row.file_type,
            uploader_name: row.uploader_name,
            uploader_email: row.uploader_email,
            download_count: row.download_count,
            rating_sum: row.rating_sum,
            rating_count: row.rating_count,
            tags,
            is_verified: row.is_verified != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn create(&self, note: Note) -> Result<Note> {
        let tags_json = serde_json::to_string(&note.tags)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let is_verified_int = if note.is_verified { 1i32 } else { 0i32 };

        sqlx::query(
            r#"
            INSERT INTO notes (
                id, subject_id, title, description, file_url, file_name,
                file_size, file_type, uploader_name, uploader_email,
                download_count, rating_sum, rating_count, tags, is_verified,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(note.id.to_string())
        .bind(note.subject_id.to_string())
        .bind(&note.title)
        .bind(&note.description)
        .bind(&note.file_url)
        .bind(&note.file_name)
        .bind(note.file_size)
        .bind(&note.file_type)
        .bind(&note.uploader_name)
        .bind(&note.uploader_email)
        .bind(note.download_count)
        .bind(note.rating_sum)
        .bind(note.rating_count)
        .bind(&tags_json)
        .bind(is_verified_int)
        .bind(note.created_at.naive_utc())
        .bind(note.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(note.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created note".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, subject_id, title, description, file_url, file_name,
                   file_size, file_type, uploader_name, uploader_email,
                   download_count, rating_sum, rating_count, tags, is_verified,
                   created_at, updated_at
            FROM notes
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_note(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, subject_id: Option<Uuid>) -> Result<Vec<Note>> {
        let rows = match subject_id {
            Some(subject_id) => {
                sqlx::query_as::<_, NoteRow>(
                    r#"
                    SELECT id, subject_id, title, description, file_url, file_name,
                           file_size, file_type, uploader_name, uploader_email,
                           download_count, rating_sum, rating_count, tags, is_verified,
                           created_at, updated_at
                    FROM notes
                    WHERE subject_id = ?
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(subject_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, NoteRow>(
                    r#"
                    SELECT id, subject_id, title, description, file_url, file_name,
                           file_size, file_type, uploader_name, uploader_email,
                           download_count, rating_sum, rating_count, tags, is_verified,
                           created_at, updated_at
                    FROM notes
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_note).collect()
    }

    async fn increment_download_count(&self, id: Uuid) -> Result<Note> {
        let result = sqlx::query(
            "UPDATE notes SET download_count = download_count + 1, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Note not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated note".to_string())
        })
    }
}
