//! WebSocket interfaces
//!
//! - `notifications`: Real-time event streaming to dashboard clients
//! - `registry`: Connected-client and subscription tracking

pub mod notifications;
pub mod registry;

pub use notifications::{ws_notifications_handler, NotificationState};
pub use registry::{create_client_registry, ClientInfo, ClientRegistry, SharedClientRegistry};
