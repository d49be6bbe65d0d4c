//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — re-exported standard result type

use super::alert::AlertRepository;
use super::fleet::FleetRepository;
use super::location::LocationRepository;
use super::tire::TireRepository;
use super::truck::TruckRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let truck = repos.trucks().find_by_id("t-001").await?;
///     let tires = repos.tires().find_by_truck("t-001").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn trucks(&self) -> &dyn TruckRepository;
    fn tires(&self) -> &dyn TireRepository;
    fn alerts(&self) -> &dyn AlertRepository;
    fn locations(&self) -> &dyn LocationRepository;
    fn fleet(&self) -> &dyn FleetRepository;
}
