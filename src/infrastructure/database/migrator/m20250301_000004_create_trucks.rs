//! Create trucks table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_fleet_groups::FleetGroups;
use super::m20250301_000002_create_truck_models::TruckModels;
use super::m20250301_000003_create_drivers::Drivers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trucks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trucks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Trucks::PlateNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Trucks::ModelId).string())
                    .col(ColumnDef::new(Trucks::FleetGroupId).string())
                    .col(ColumnDef::new(Trucks::DriverId).string())
                    .col(
                        ColumnDef::new(Trucks::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Trucks::Latitude).double())
                    .col(ColumnDef::new(Trucks::Longitude).double())
                    .col(
                        ColumnDef::new(Trucks::Heading)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Trucks::SpeedKmh)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Trucks::FuelLevel)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(
                        ColumnDef::new(Trucks::PayloadTons)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Trucks::OdometerKm)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Trucks::EngineHours)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Trucks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trucks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trucks_model")
                            .from(Trucks::Table, Trucks::ModelId)
                            .to(TruckModels::Table, TruckModels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trucks_fleet_group")
                            .from(Trucks::Table, Trucks::FleetGroupId)
                            .to(FleetGroups::Table, FleetGroups::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trucks_driver")
                            .from(Trucks::Table, Trucks::DriverId)
                            .to(Drivers::Table, Drivers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // The simulator's candidate query filters on status every tick
        manager
            .create_index(
                Index::create()
                    .name("idx_trucks_status")
                    .table(Trucks::Table)
                    .col(Trucks::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trucks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Trucks {
    Table,
    Id,
    PlateNumber,
    ModelId,
    FleetGroupId,
    DriverId,
    Status,
    Latitude,
    Longitude,
    Heading,
    SpeedKmh,
    FuelLevel,
    PayloadTons,
    OdometerKm,
    EngineHours,
    CreatedAt,
    UpdatedAt,
}
