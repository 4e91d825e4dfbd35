use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{api::state::AppState, domain::Notice, error::Result};

/// Triggers a scrape of the configured source pages. Invoked on a schedule,
/// but also callable by hand from the admin dashboard.
pub async fn ingest(State(state): State<AppState>) -> Result<Json<Value>> {
    let report = state.service_context.ingest_service.run().await?;

    Ok(Json(json!({
        "success": true,
        "message": format!(
            "Processed {} notices, added {} new notices",
            report.processed, report.inserted
        ),
        "newNotices": report.inserted,
    })))
}

/// Active notices for the notice board, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Notice>>> {
    let notices = state.service_context.notice_repo.list_active().await?;
    Ok(Json(notices))
}
