//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod alert_repository;
pub mod fleet_repository;
pub mod location_repository;
pub mod repository_provider;
pub mod tire_repository;
pub mod truck_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
