use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{api::state::AppState, domain::VisitorStats, error::Result};

/// The client remembers (locally) whether this browser has been here
/// before; first visits also bump the unique counter.
#[derive(Debug, Deserialize, Default)]
pub struct RecordVisitRequest {
    #[serde(default)]
    pub first_visit: bool,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<VisitorStats>> {
    let stats = state.service_context.visitor_repo.stats().await?;
    Ok(Json(stats))
}

pub async fn record_visit(
    State(state): State<AppState>,
    request: Option<Json<RecordVisitRequest>>,
) -> Result<Json<VisitorStats>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let stats = state
        .service_context
        .visitor_repo
        .record_visit(request.first_visit)
        .await?;
    Ok(Json(stats))
}
