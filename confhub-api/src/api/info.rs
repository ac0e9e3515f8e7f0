//! Application metadata endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub description: String,
    pub git_hash: String,
    pub build_timestamp: String,
}

/// GET /
///
/// Name, version and environment come from configuration; build fields are
/// captured by `build.rs`.
pub async fn app_info(State(state): State<AppState>) -> Json<AppInfo> {
    Json(AppInfo {
        name: state.app.name.clone(),
        version: state.app.version.clone(),
        environment: state.app.environment.clone(),
        description: "API for managing conferences and speakers.".to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
    })
}
