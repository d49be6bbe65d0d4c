//! Create location_samples table

use sea_orm_migration::prelude::*;

use super::m20250301_000004_create_trucks::Trucks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LocationSamples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LocationSamples::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::TruckId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::Latitude)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::Longitude)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::SpeedKmh)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::Heading)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::FuelLevel)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationSamples::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_samples_truck")
                            .from(LocationSamples::Table, LocationSamples::TruckId)
                            .to(Trucks::Table, Trucks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // History reads are always per truck, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_location_samples_truck_recorded")
                    .table(LocationSamples::Table)
                    .col(LocationSamples::TruckId)
                    .col(LocationSamples::RecordedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LocationSamples::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum LocationSamples {
    Table,
    Id,
    TruckId,
    Latitude,
    Longitude,
    SpeedKmh,
    Heading,
    FuelLevel,
    RecordedAt,
}
