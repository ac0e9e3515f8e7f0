//! Domain logic
//!
//! Registration enforces the uniqueness rules before writing; every other
//! operation passes straight through to `crate::db`.

pub mod conference_service;
pub mod speaker_service;
