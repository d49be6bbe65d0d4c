//! Event Bus for broadcasting events to subscribers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::domain::events::{Event, EventMessage};

const DEFAULT_CAPACITY: usize = 1024;

/// Event bus for broadcasting events to all subscribers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publish an event to every current subscriber. Delivery is
    /// at-most-once: with no subscribers the event is dropped, and a
    /// lagging subscriber loses the oldest buffered messages rather
    /// than blocking the publisher.
    pub fn publish(&self, event: Event) {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let channel = message.event.channel();
        let truck_id = message.event.truck_id().map(String::from);

        metrics::counter!("fleet_events_published_total", "type" => event_type).increment(1);

        match self.sender.send(message) {
            Ok(count) => {
                debug!(
                    event_type,
                    channel = %channel,
                    ?truck_id,
                    subscribers = count,
                    "Event published"
                );
            }
            Err(_) => {
                debug!(
                    event_type,
                    channel = %channel,
                    ?truck_id,
                    "Event published (no subscribers)"
                );
            }
        }
    }

    pub fn subscribe(&self) -> EventSubscriber {
        let receiver = self.sender.subscribe();
        self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        let count = self.subscriber_count.load(Ordering::SeqCst);
        info!(total = count, "New event subscriber");

        EventSubscriber {
            receiver,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event subscriber that receives events from the bus
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventSubscriber {
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(missed = count, "Subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return None;
                }
            }
        }
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        let prev = self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
        info!(remaining = prev.saturating_sub(1), "Event subscriber disconnected");
    }
}

/// Shared event bus type
pub type SharedEventBus = Arc<EventBus>;

/// Create a shared event bus
pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::domain::events::TickCompletedEvent;

    fn tick_event(updated: usize) -> Event {
        Event::TickCompleted(TickCompletedEvent {
            timestamp: Utc::now(),
            updated_count: updated,
        })
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let bus = EventBus::new();
        bus.publish(tick_event(3));

        // The bus stays usable after dropping an event on the floor
        let mut sub = bus.subscribe();
        bus.publish(tick_event(7));

        let msg = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .ok()
            .flatten();
        let msg = msg.unwrap();
        assert_eq!(msg.event.event_type(), "tick-completed");
        match msg.event {
            Event::TickCompleted(payload) => assert_eq!(payload.updated_count, 7),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn subscriber_count_tracks_subscribe_and_drop() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        let first = bus.subscribe();
        let second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(first);
        assert_eq!(bus.subscriber_count(), 1);
        drop(second);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn all_subscribers_receive_the_same_event() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(tick_event(42));

        for sub in [&mut a, &mut b] {
            let msg = tokio::time::timeout(Duration::from_secs(1), sub.recv())
                .await
                .ok()
                .flatten()
                .unwrap();
            match msg.event {
                Event::TickCompleted(payload) => assert_eq!(payload.updated_count, 42),
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }
}
