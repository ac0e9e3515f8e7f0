//! # Confhub Common Library
//!
//! Shared code for the confhub service:
//! - Error types
//! - Configuration loading
//! - Database bootstrap (pool + schema)
//! - Entity models, patches and input validation

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
