//! confhub-api library - conference and speaker records over HTTP
//!
//! Layers, leaf first:
//! - `db`: one storage operation per function
//! - `services`: duplicate checks on registration, pass-through otherwise
//! - `api`: request extraction, response shaping, status codes

use axum::Router;
use confhub_common::config::AppMetadata;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod services;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; each request checks out its own connection
    pub db: SqlitePool,
    /// Application metadata reported at `GET /`
    pub app: AppMetadata,
}

impl AppState {
    pub fn new(db: SqlitePool, app: AppMetadata) -> Self {
        Self { db, app }
    }
}

/// Conference and speaker resource routes
///
/// Collection routes also answer with a trailing slash.
fn resource_routes() -> Router<AppState> {
    use axum::routing::get;

    Router::new()
        .route(
            "/conferences",
            get(api::list_conferences).post(api::create_conference),
        )
        .route(
            "/conferences/",
            get(api::list_conferences).post(api::create_conference),
        )
        .route(
            "/conferences/:conference_id",
            get(api::get_conference)
                .put(api::update_conference)
                .delete(api::delete_conference),
        )
        .route(
            "/speakers",
            get(api::list_speakers).post(api::create_speaker),
        )
        .route(
            "/speakers/",
            get(api::list_speakers).post(api::create_speaker),
        )
        .route(
            "/speakers/:speaker_id",
            get(api::get_speaker)
                .put(api::update_speaker)
                .delete(api::delete_speaker),
        )
}

/// Build application router
///
/// Resources are served at the root and again under `/api/v1`.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(resource_routes())
        .nest("/api/v1", resource_routes())
        .route("/", get(api::app_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
