//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod event_repo;
pub mod pending_session_repo;
pub mod unregistered_tag_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use event_repo::EventRepo;
pub use pending_session_repo::PendingSessionRepo;
pub use unregistered_tag_repo::UnregisteredTagRepo;
pub use user_repo::UserRepo;
