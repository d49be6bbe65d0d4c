//! Alert repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Alert, NewAlert};
use crate::domain::DomainResult;

#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn create(&self, alert: NewAlert) -> DomainResult<Alert>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Alert>>;
    /// All alerts, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Alert>>;
    /// Alerts for one truck, newest first.
    async fn find_by_truck(&self, truck_id: &str) -> DomainResult<Vec<Alert>>;
    /// Distinct ids of trucks that have at least one unresolved alert.
    async fn trucks_with_open_alerts(&self) -> DomainResult<Vec<String>>;
    /// Idempotent: returns the alert with `resolved = true`; the bool is
    /// false when it was already resolved before this call.
    async fn resolve(&self, id: &str) -> DomainResult<(Alert, bool)>;
    /// Retention cleanup for resolved alerts. Returns rows deleted.
    async fn delete_resolved_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64>;
}
