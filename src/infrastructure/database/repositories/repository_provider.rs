//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::alert::AlertRepository;
use crate::domain::fleet::FleetRepository;
use crate::domain::location::LocationRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::tire::TireRepository;
use crate::domain::truck::TruckRepository;

use super::alert_repository::SeaOrmAlertRepository;
use super::fleet_repository::SeaOrmFleetRepository;
use super::location_repository::SeaOrmLocationRepository;
use super::tire_repository::SeaOrmTireRepository;
use super::truck_repository::SeaOrmTruckRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let truck = repos.trucks().find_by_plate("01 777 AAA").await?;
/// let readings = repos.tires().find_by_truck(&truck.id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    trucks: SeaOrmTruckRepository,
    tires: SeaOrmTireRepository,
    alerts: SeaOrmAlertRepository,
    locations: SeaOrmLocationRepository,
    fleet: SeaOrmFleetRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            trucks: SeaOrmTruckRepository::new(db.clone()),
            tires: SeaOrmTireRepository::new(db.clone()),
            alerts: SeaOrmAlertRepository::new(db.clone()),
            locations: SeaOrmLocationRepository::new(db.clone()),
            fleet: SeaOrmFleetRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn trucks(&self) -> &dyn TruckRepository {
        &self.trucks
    }

    fn tires(&self) -> &dyn TireRepository {
        &self.tires
    }

    fn alerts(&self) -> &dyn AlertRepository {
        &self.alerts
    }

    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn fleet(&self) -> &dyn FleetRepository {
        &self.fleet
    }
}
