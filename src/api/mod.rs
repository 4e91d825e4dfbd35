pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Scheduled-function endpoints (formerly hosted edge functions)
        .route("/functions/fetch-notices", post(handlers::notices::ingest))
        .route("/functions/keep-alive", post(handlers::keepalive::keep_alive))
        // Portal API
        .nest("/api", api_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// The portal is served from a different origin than this API, and the old
/// hosted-function clients send their auth headers on every call. Preflights
/// are answered here, before any handler runs.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/notices", get(handlers::notices::list))
        .route("/faculties", get(handlers::catalog::list_faculties))
        .route("/programs", get(handlers::catalog::list_programs))
        .route("/subjects", get(handlers::catalog::list_subjects))
        .route("/subjects", post(handlers::catalog::create_subject))
        .route("/notes", get(handlers::notes::list))
        .route("/notes", post(handlers::notes::create))
        .route("/notes/:id/download", post(handlers::notes::record_download))
        .route("/visitors", get(handlers::visitors::stats))
        .route("/visitors", post(handlers::visitors::record_visit))
}
