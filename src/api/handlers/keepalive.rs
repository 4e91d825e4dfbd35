use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{api::state::AppState, error::Result};

pub async fn keep_alive(State(state): State<AppState>) -> Result<Json<Value>> {
    let report = state.service_context.keepalive_service.run().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Keep-alive executed successfully",
        "inserted": report.inserted,
        "deleted": report.deleted,
        "timestamp": report.timestamp.to_rfc3339(),
    })))
}
