//! HTTP handlers, one module per resource.
//!
//! Endpoints consumed by the RFID reader firmware answer in plain text
//! (the firmware string-matches response bodies); operator-facing endpoints
//! answer in JSON.

pub mod attendance;
pub mod events;
pub mod scan;
pub mod tags;
