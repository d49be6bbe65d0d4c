//! Tire reading repository interface

use async_trait::async_trait;

use super::model::{TireReading, TireStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait TireRepository: Send + Sync {
    /// All readings for a truck, ordered by slot.
    async fn find_by_truck(&self, truck_id: &str) -> DomainResult<Vec<TireReading>>;
    async fn find_by_truck_and_slot(
        &self,
        truck_id: &str,
        slot: u32,
    ) -> DomainResult<Option<TireReading>>;
    /// One row per (truck, slot): updates the existing reading or creates
    /// it. Pressure is clamped and status derived before the write.
    async fn upsert(
        &self,
        truck_id: &str,
        slot: u32,
        pressure_psi: f64,
        temperature_c: f64,
    ) -> DomainResult<TireReading>;
    /// Apply ONE shared delta to every reading of the truck atomically:
    /// clamp each pressure and recompute each status in the same
    /// transaction. Returns the number of readings updated.
    async fn shift_all_pressures(&self, truck_id: &str, delta_psi: f64) -> DomainResult<usize>;
    async fn count_by_status(&self, status: TireStatus) -> DomainResult<u64>;
}
