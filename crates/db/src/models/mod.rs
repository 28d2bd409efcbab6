//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts

pub mod event;
pub mod session;
pub mod unregistered;
pub mod user;
