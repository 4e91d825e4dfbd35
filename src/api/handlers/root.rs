use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "StudyHub API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backend for the student study-materials portal",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "functions": ["/functions/fetch-notices", "/functions/keep-alive"]
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
