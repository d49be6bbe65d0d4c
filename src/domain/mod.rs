pub mod alert;
pub mod events;
pub mod fleet;
pub mod geo;
pub mod location;
pub mod repositories;
pub mod tire;
pub mod truck;

// Re-export commonly used types
pub use alert::{Alert, AlertSeverity, NewAlert};
pub use events::{Channel, Event, EventMessage};
pub use fleet::{Driver, FleetGroup, TruckModel};
pub use geo::GeoBounds;
pub use location::{LocationSample, NewLocationSample};
pub use repositories::RepositoryProvider;
pub use tire::{TireReading, TireStatus};
pub use truck::{NewTruck, Position, TelemetryUpdate, Truck, TruckStatus, TruckUpdate};

// Re-export error types for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
