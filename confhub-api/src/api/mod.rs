//! HTTP API handlers for confhub-api

pub mod conferences;
pub mod error;
pub mod extract;
pub mod health;
pub mod info;
pub mod speakers;

use serde::{Deserialize, Serialize};

pub use conferences::{
    create_conference, delete_conference, get_conference, list_conferences, update_conference,
};
pub use error::ApiError;
pub use health::health_routes;
pub use info::app_info;
pub use speakers::{create_speaker, delete_speaker, get_speaker, list_speakers, update_speaker};

/// Confirmation body returned by DELETE routes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
