//! Create tire_readings table

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
                    .table(TireReadings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TireReadings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TireReadings::TruckId).string().not_null())
                    .col(ColumnDef::new(TireReadings::Slot).integer().not_null())
                    .col(
                        ColumnDef::new(TireReadings::PressurePsi)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TireReadings::Status)
                            .string()
                            .not_null()
                            .default("normal"),
                    )
                    .col(
                        ColumnDef::new(TireReadings::TemperatureC)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(TireReadings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TireReadings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tire_readings_truck")
                            .from(TireReadings::Table, TireReadings::TruckId)
                            .to(Trucks::Table, Trucks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One reading per mounting slot per truck
        manager
            .create_index(
                Index::create()
                    .name("idx_tire_readings_truck_slot")
                    .table(TireReadings::Table)
                    .col(TireReadings::TruckId)
                    .col(TireReadings::Slot)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TireReadings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TireReadings {
    Table,
    Id,
    TruckId,
    Slot,
    PressurePsi,
    Status,
    TemperatureC,
    CreatedAt,
    UpdatedAt,
}
