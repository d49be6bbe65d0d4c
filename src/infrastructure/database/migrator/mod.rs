//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_fleet_groups;
mod m20250301_000002_create_truck_models;
mod m20250301_000003_create_drivers;
mod m20250301_000004_create_trucks;
mod m20250301_000005_create_tire_readings;
mod m20250301_000006_create_alerts;
mod m20250301_000007_create_location_samples;
mod m20250301_000008_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_fleet_groups::Migration),
            Box::new(m20250301_000002_create_truck_models::Migration),
            Box::new(m20250301_000003_create_drivers::Migration),
            Box::new(m20250301_000004_create_trucks::Migration),
            Box::new(m20250301_000005_create_tire_readings::Migration),
            Box::new(m20250301_000006_create_alerts::Migration),
            Box::new(m20250301_000007_create_location_samples::Migration),
            Box::new(m20250301_000008_create_users::Migration),
        ]
    }
}
