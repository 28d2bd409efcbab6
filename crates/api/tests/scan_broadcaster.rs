//! Tests for the bus-to-WebSocket fan-out task.
//!
//! Runs a real `ScanBroadcaster` over an `EventBus` subscription and
//! asserts the JSON text frames arriving at each registered connection,
//! plus the shutdown and lag behavior of the receive loop.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use chrono::Utc;

use evpass_api::broadcaster::ScanBroadcaster;
use evpass_api::ws::WsManager;
use evpass_db::models::user::User;
use evpass_events::{EventBus, ScanEvent};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_user() -> User {
    User {
        id: 1,
        tag_id: "A1".into(),
        first_name: "Ana".into(),
        last_name: "Reyes".into(),
        course: Some("BSIT".into()),
        section: Some("3B".into()),
        student_num: Some("2021-00123".into()),
        user_type: "Student".into(),
        created_at: Utc::now(),
    }
}

fn scan_event(tag_id: &str) -> ScanEvent {
    ScanEvent {
        tag_id: tag_id.into(),
        timestamp: Utc::now(),
        time_type: "time-in".into(),
        user: sample_user(),
        evt_tag_id: Some("EVT1".into()),
        evt_title: Some("Orientation".into()),
        evt_host_org: Some("CS Society".into()),
    }
}

async fn next_json(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Message>) -> serde_json::Value {
    let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("channel closed");
    match msg {
        Message::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("Expected text frame, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: a published scan reaches every connection as a JSON text frame
// ---------------------------------------------------------------------------

#[tokio::test]
async fn published_scan_reaches_every_connection_as_json() {
    let manager = Arc::new(WsManager::new());
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;

    let bus = EventBus::default();
    let broadcaster = ScanBroadcaster::new(Arc::clone(&manager));
    let handle = tokio::spawn(broadcaster.run(bus.subscribe()));

    bus.publish(scan_event("A1"));

    for rx in [&mut rx1, &mut rx2] {
        let json = next_json(rx).await;
        assert_eq!(json["tag_id"], "A1");
        assert_eq!(json["time_type"], "time-in");
        assert_eq!(json["user"]["first_name"], "Ana");
        assert_eq!(json["user"]["last_name"], "Reyes");
        assert_eq!(json["evt_tag_id"], "EVT1");
        assert_eq!(json["evt_title"], "Orientation");
        assert_eq!(json["evt_host_org"], "CS Society");
    }

    // Dropping the bus closes the channel and ends the loop.
    drop(bus);
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("broadcaster should stop when the bus closes")
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: null event fields survive serialization when no event is active
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scan_without_event_serializes_null_fields() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string()).await;

    let bus = EventBus::default();
    let handle = tokio::spawn(ScanBroadcaster::new(Arc::clone(&manager)).run(bus.subscribe()));

    let mut event = scan_event("A1");
    event.evt_tag_id = None;
    event.evt_title = None;
    event.evt_host_org = None;
    bus.publish(event);

    let json = next_json(&mut rx).await;
    assert_eq!(json["tag_id"], "A1");
    assert!(json["evt_tag_id"].is_null());
    assert!(json["evt_title"].is_null());
    assert!(json["evt_host_org"].is_null());

    drop(bus);
    let _ = tokio::time::timeout(Duration::from_secs(1), handle).await;
}

// ---------------------------------------------------------------------------
// Test: a lagged subscription drops old events but keeps delivering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lagged_subscription_recovers_and_delivers_latest() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string()).await;

    // Capacity 1 and three publishes before the loop starts: the receiver
    // observes a lag, then the surviving newest event.
    let bus = EventBus::new(1);
    let subscription = bus.subscribe();
    for tag in ["A1", "A2", "A3"] {
        bus.publish(scan_event(tag));
    }

    let handle = tokio::spawn(ScanBroadcaster::new(Arc::clone(&manager)).run(subscription));

    let json = next_json(&mut rx).await;
    assert_eq!(json["tag_id"], "A3");

    drop(bus);
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("broadcaster should stop when the bus closes")
        .unwrap();
}
