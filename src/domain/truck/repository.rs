//! Truck repository interface

use async_trait::async_trait;

use super::model::{NewTruck, TelemetryUpdate, Truck, TruckStatus, TruckUpdate};
use crate::domain::DomainResult;

#[async_trait]
pub trait TruckRepository: Send + Sync {
    async fn create(&self, truck: NewTruck) -> DomainResult<Truck>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Truck>>;
    async fn find_by_plate(&self, plate_number: &str) -> DomainResult<Option<Truck>>;
    async fn find_all(&self) -> DomainResult<Vec<Truck>>;
    /// Trucks eligible for a simulation tick: `status = active` and a
    /// non-null position.
    async fn find_simulation_candidates(&self) -> DomainResult<Vec<Truck>>;
    async fn update(&self, id: &str, update: TruckUpdate) -> DomainResult<Truck>;
    async fn update_status(&self, id: &str, status: TruckStatus) -> DomainResult<Truck>;
    /// Persist one tick of simulated movement as a single row update
    /// (position, speed, heading, fuel, `updated_at`).
    async fn apply_telemetry(&self, id: &str, telemetry: TelemetryUpdate) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
