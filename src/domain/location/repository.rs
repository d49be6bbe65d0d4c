//! Location history repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{LocationSample, NewLocationSample};
use crate::domain::DomainResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn append(&self, sample: NewLocationSample) -> DomainResult<()>;
    /// Most recent samples for a truck, newest first.
    async fn find_recent(&self, truck_id: &str, limit: u64) -> DomainResult<Vec<LocationSample>>;
    /// Retention cleanup. Returns rows deleted.
    async fn prune_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64>;
    async fn count(&self) -> DomainResult<u64>;
}
