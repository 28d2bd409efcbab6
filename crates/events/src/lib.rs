//! In-process scan event bus.
//!
//! Handlers publish accepted scans here; the WebSocket fan-out task in the
//! API crate subscribes and forwards each event to connected browsers.

pub mod bus;

pub use bus::{EventBus, ScanEvent};
