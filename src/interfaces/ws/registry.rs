//! Registry of connected notification clients

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::info;
use uuid::Uuid;

use crate::domain::events::Channel;

/// A connected notification client
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Channels the client is currently subscribed to
    pub channels: HashSet<Channel>,
}

/// Tracks active notification connections and their subscriptions
///
/// A fresh connection starts with an empty channel set. The registry
/// backs the gateway monitoring endpoint and the connected-clients
/// gauge.
pub struct ClientRegistry {
    /// Active connections indexed by connection ID
    clients: DashMap<String, ClientInfo>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Register a new connection and return its ID
    pub fn register(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let client = ClientInfo {
            connected_at: Utc::now(),
            channels: HashSet::new(),
        };
        self.clients.insert(id.clone(), client);
        metrics::gauge!("ws_clients_connected").increment(1.0);
        info!("Notification client registered: {}", id);
        id
    }

    /// Unregister a connection
    pub fn unregister(&self, client_id: &str) {
        if self.clients.remove(client_id).is_some() {
            metrics::gauge!("ws_clients_connected").decrement(1.0);
            info!("Notification client unregistered: {}", client_id);
        }
    }

    /// Add a channel to a connection's subscription set
    pub fn subscribe(&self, client_id: &str, channel: Channel) {
        if let Some(mut client) = self.clients.get_mut(client_id) {
            client.channels.insert(channel);
        }
    }

    /// Remove a channel from a connection's subscription set
    pub fn unsubscribe(&self, client_id: &str, channel: Channel) {
        if let Some(mut client) = self.clients.get_mut(client_id) {
            client.channels.remove(&channel);
        }
    }

    /// Check whether a connection is subscribed to a channel
    pub fn is_subscribed(&self, client_id: &str, channel: Channel) -> bool {
        self.clients
            .get(client_id)
            .map(|client| client.channels.contains(&channel))
            .unwrap_or(false)
    }

    /// Number of active connections
    pub fn connected_count(&self) -> usize {
        self.clients.len()
    }

    /// Subscriber count per channel, keyed by the channel wire name
    ///
    /// Every known channel appears in the map even at zero so the
    /// monitoring payload keeps a stable shape.
    pub fn channel_counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = Channel::ALL
            .iter()
            .map(|channel| (channel.as_str().to_string(), 0))
            .collect();

        for client in self.clients.iter() {
            for channel in &client.channels {
                *counts.entry(channel.as_str().to_string()).or_insert(0) += 1;
            }
        }

        counts
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe client registry
pub type SharedClientRegistry = Arc<ClientRegistry>;

pub fn create_client_registry() -> SharedClientRegistry {
    Arc::new(ClientRegistry::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_connection_has_no_subscriptions() {
        let registry = ClientRegistry::new();
        let id = registry.register();

        assert_eq!(registry.connected_count(), 1);
        assert!(!registry.is_subscribed(&id, Channel::TruckUpdates));
        assert!(!registry.is_subscribed(&id, Channel::Alerts));
    }

    #[test]
    fn subscribe_and_unsubscribe_update_channel_counts() {
        let registry = ClientRegistry::new();
        let a = registry.register();
        let b = registry.register();

        registry.subscribe(&a, Channel::TruckUpdates);
        registry.subscribe(&b, Channel::TruckUpdates);
        registry.subscribe(&b, Channel::Alerts);

        let counts = registry.channel_counts();
        assert_eq!(counts["truck-updates"], 2);
        assert_eq!(counts["alerts"], 1);

        registry.unsubscribe(&b, Channel::TruckUpdates);
        let counts = registry.channel_counts();
        assert_eq!(counts["truck-updates"], 1);
        assert!(registry.is_subscribed(&b, Channel::Alerts));
    }

    #[test]
    fn channel_counts_always_list_every_channel() {
        let registry = ClientRegistry::new();
        let counts = registry.channel_counts();

        for channel in Channel::ALL {
            assert_eq!(counts[channel.as_str()], 0);
        }
    }

    #[test]
    fn unregister_drops_the_connection_and_its_subscriptions() {
        let registry = ClientRegistry::new();
        let id = registry.register();
        registry.subscribe(&id, Channel::Alerts);

        registry.unregister(&id);

        assert_eq!(registry.connected_count(), 0);
        assert_eq!(registry.channel_counts()["alerts"], 0);
        assert!(!registry.is_subscribed(&id, Channel::Alerts));
    }

    #[test]
    fn operations_on_unknown_clients_are_noops() {
        let registry = ClientRegistry::new();

        registry.subscribe("ghost", Channel::Alerts);
        registry.unsubscribe("ghost", Channel::Alerts);
        registry.unregister("ghost");

        assert_eq!(registry.connected_count(), 0);
        assert!(!registry.is_subscribed("ghost", Channel::Alerts));
    }
}
