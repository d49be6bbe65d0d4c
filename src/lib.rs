//! # Texnouz Fleet Telemetry
//!
//! Telemetry backend for mining-truck fleet tracking: REST API, live
//! WebSocket position pushes and a periodic position simulator that keeps
//! the fleet moving when no real sensor feed is attached.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Services (position simulator, mutations) and the event bus
//! - **infrastructure**: Database (SeaORM), migrations, crypto
//! - **interfaces**: HTTP API with Swagger documentation, WebSocket notifications
//! - **shared**: Errors, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export the event bus (the broadcast gateway handle)
pub use application::events::{create_event_bus, EventBus, SharedEventBus};
pub use domain::events::{Channel, Event, EventMessage};
