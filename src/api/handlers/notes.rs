use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::Note,
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub subject_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    pub subject_id: Uuid,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub file_type: String,
    pub uploader_name: Option<String>,
    #[validate(email)]
    pub uploader_email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>> {
    let notes = state
        .service_context
        .note_repo
        .list(params.subject_id)
        .await?;
    Ok(Json(notes))
}

/// Records metadata for an uploaded file. The file itself has already been
/// pushed to object storage by the client; we only get its public URL.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let now = Utc::now();
    let note = Note {
        id: Uuid::new_v4(),
        subject_id: request.subject_id,
        title: request.title,
        description: request.description,
        file_url: request.file_url,
        file_name: request.file_name,
        file_size: request.file_size,
        file_type: request.file_type,
        uploader_name: request.uploader_name,
        uploader_email: request.uploader_email,
        download_count: 0,
        rating_sum: 0,
        rating_count: 0,
        tags: request.tags,
        is_verified: false,
        created_at: now,
        updated_at: now,
    };

    let created = state.service_context.note_repo.create(note).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn record_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>> {
    let note = state
        .service_context
        .note_repo
        .increment_download_count(id)
        .await?;
    Ok(Json(note))
}
