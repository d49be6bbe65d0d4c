//! Notification events
//!
//! The single tagged-union event type broadcast by the gateway. Wire
//! names and payload casing follow the dashboard contract: kebab-case
//! `type` discriminator, camelCase `data` fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pub/sub channel a client can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Position/telemetry deltas and status transitions
    TruckUpdates,
    /// Alert lifecycle
    Alerts,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::TruckUpdates, Channel::Alerts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TruckUpdates => "truck-updates",
            Self::Alerts => "alerts",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "truck-updates" => Some(Self::TruckUpdates),
            "alerts" => Some(Self::Alerts),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    #[serde(rename = "tick-completed")]
    TickCompleted(TickCompletedEvent),
    #[serde(rename = "status-changed")]
    StatusChanged(StatusChangedEvent),
    #[serde(rename = "new-alert")]
    NewAlert(NewAlertEvent),
    #[serde(rename = "alert-resolved")]
    AlertResolved(AlertResolvedEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::TickCompleted(_) => "tick-completed",
            Event::StatusChanged(_) => "status-changed",
            Event::NewAlert(_) => "new-alert",
            Event::AlertResolved(_) => "alert-resolved",
        }
    }

    /// Which channel this event is published to.
    pub fn channel(&self) -> Channel {
        match self {
            Event::TickCompleted(_) | Event::StatusChanged(_) => Channel::TruckUpdates,
            Event::NewAlert(_) | Event::AlertResolved(_) => Channel::Alerts,
        }
    }

    pub fn truck_id(&self) -> Option<&str> {
        match self {
            Event::TickCompleted(_) => None,
            Event::StatusChanged(e) => Some(&e.truck_id),
            Event::NewAlert(e) => Some(&e.truck_id),
            Event::AlertResolved(e) => Some(&e.truck_id),
        }
    }
}

/// Emitted once per simulator tick with the count of trucks actually
/// updated. Deliberately NOT the per-truck payload: clients re-poll the
/// REST listing for details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickCompletedEvent {
    pub timestamp: DateTime<Utc>,
    pub updated_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangedEvent {
    pub truck_id: String,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlertEvent {
    pub alert_id: String,
    pub truck_id: String,
    pub kind: String,
    pub severity: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResolvedEvent {
    pub alert_id: String,
    pub truck_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_completed_wire_shape() {
        let message = EventMessage::new(Event::TickCompleted(TickCompletedEvent {
            timestamp: Utc::now(),
            updated_count: 23,
        }));
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "tick-completed");
        assert_eq!(value["data"]["updatedCount"], 23);
        assert!(value["data"]["timestamp"].is_string());
        assert!(value["timestamp"].is_string());
        assert!(value["id"].is_string());
    }

    #[test]
    fn status_changed_wire_shape() {
        let event = Event::StatusChanged(StatusChangedEvent {
            truck_id: "t-001".to_string(),
            old_status: "active".to_string(),
            new_status: "maintenance".to_string(),
            timestamp: Utc::now(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "status-changed");
        assert_eq!(value["data"]["truckId"], "t-001");
        assert_eq!(value["data"]["newStatus"], "maintenance");
    }

    #[test]
    fn events_route_to_their_channels() {
        let tick = Event::TickCompleted(TickCompletedEvent {
            timestamp: Utc::now(),
            updated_count: 1,
        });
        assert_eq!(tick.channel(), Channel::TruckUpdates);

        let alert = Event::NewAlert(NewAlertEvent {
            alert_id: "a-1".to_string(),
            truck_id: "t-001".to_string(),
            kind: "fuel_low".to_string(),
            severity: "medium".to_string(),
            message: "Fuel below 10%".to_string(),
            timestamp: Utc::now(),
        });
        assert_eq!(alert.channel(), Channel::Alerts);

        let resolved = Event::AlertResolved(AlertResolvedEvent {
            alert_id: "a-1".to_string(),
            truck_id: "t-001".to_string(),
            timestamp: Utc::now(),
        });
        assert_eq!(resolved.channel(), Channel::Alerts);
    }

    #[test]
    fn channel_parse_matches_wire_names() {
        assert_eq!(Channel::parse("truck-updates"), Some(Channel::TruckUpdates));
        assert_eq!(Channel::parse("alerts"), Some(Channel::Alerts));
        assert_eq!(Channel::parse("trucks"), None);
        for channel in Channel::ALL {
            assert_eq!(Channel::parse(channel.as_str()), Some(channel));
        }
    }
}
