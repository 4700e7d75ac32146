use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main router: HTML pages, JSON API and static assets
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let request_timeout = state.request_timeout;

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Pages
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::submit_prediction))
        .route("/history", get(handlers::history_page))
        .route("/history/clear", post(handlers::clear_history_form))
        // JSON API
        .route("/v1/cover-types", get(handlers::list_cover_types))
        .route("/v1/predictions", post(handlers::create_prediction))
        .route(
            "/v1/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route("/v1/history/export", get(handlers::export_history))
        // Banner image and other assets; a missing file is a plain 404
        .nest_service("/static", static_files)
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
}
