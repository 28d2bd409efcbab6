//! Shared domain types for the evpass attendance backend.
//!
//! Holds the error taxonomy, common type aliases, and the attendance
//! session lifecycle decision logic used by the API handlers.

pub mod attendance;
pub mod error;
pub mod types;
