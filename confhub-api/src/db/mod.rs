//! Persistence layer
//!
//! One storage operation per function, no business rules. Storage rows are
//! mapped to the `confhub_common::models` value types before returning.

pub mod conferences;
pub mod speakers;
