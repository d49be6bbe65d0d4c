//! Fleet reference data repository interface

use async_trait::async_trait;

use super::model::{Driver, FleetGroup, NewDriver, NewFleetGroup, NewTruckModel, TruckModel};
use crate::domain::DomainResult;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    async fn list_groups(&self) -> DomainResult<Vec<FleetGroup>>;
    async fn create_group(&self, group: NewFleetGroup) -> DomainResult<FleetGroup>;
    async fn find_group_by_name(&self, name: &str) -> DomainResult<Option<FleetGroup>>;

    async fn list_models(&self) -> DomainResult<Vec<TruckModel>>;
    async fn create_model(&self, model: NewTruckModel) -> DomainResult<TruckModel>;

    async fn list_drivers(&self) -> DomainResult<Vec<Driver>>;
    async fn create_driver(&self, driver: NewDriver) -> DomainResult<Driver>;
    async fn find_driver_by_id(&self, id: &str) -> DomainResult<Option<Driver>>;
}
