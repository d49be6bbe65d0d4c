//! Truck aggregate
//!
//! Contains the Truck entity, value objects, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewTruck, Position, TelemetryUpdate, Truck, TruckStatus, TruckUpdate};
pub use repository::TruckRepository;
