use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Faculty, Program, Subject},
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct ListProgramsQuery {
    pub faculty_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ListSubjectsQuery {
    pub program_id: Uuid,
    pub semester: Option<i64>,
}

/// Custom subject added from the upload page when a student's subject is
/// not in the catalog yet.
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub program_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub semester: i64,
    pub credits: Option<i64>,
    pub description: Option<String>,
}

pub async fn list_faculties(State(state): State<AppState>) -> Result<Json<Vec<Faculty>>> {
    let faculties = state.service_context.catalog_repo.list_faculties().await?;
    Ok(Json(faculties))
}

pub async fn list_programs(
    State(state): State<AppState>,
    Query(params): Query<ListProgramsQuery>,
) -> Result<Json<Vec<Program>>> {
    let programs = state
        .service_context
        .catalog_repo
        .list_programs(params.faculty_id)
        .await?;
    Ok(Json(programs))
}

pub async fn list_subjects(
    State(state): State<AppState>,
    Query(params): Query<ListSubjectsQuery>,
) -> Result<Json<Vec<Subject>>> {
    let subjects = state
        .service_context
        .catalog_repo
        .list_subjects(params.program_id, params.semester)
        .await?;
    Ok(Json(subjects))
}

pub async fn create_subject(
    State(state): State<AppState>,
    Json(request): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>)> {
    let description = request
        .description
        .unwrap_or_else(|| format!("Custom subject: {}", request.name));

    let subject = Subject {
        id: Uuid::new_v4(),
        program_id: request.program_id,
        name: request.name,
        code: request.code.unwrap_or_else(|| "CUSTOM".to_string()),
        semester: request.semester,
        credits: Some(request.credits.unwrap_or(3)),
        description: Some(description),
    };

    let created = state
        .service_context
        .catalog_repo
        .create_subject(subject)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
