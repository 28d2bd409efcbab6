//! Shared response envelope types for API handlers.
//!
//! JSON endpoints use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization. Endpoints the
//! reader firmware consumes answer in plain text and bypass the envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
