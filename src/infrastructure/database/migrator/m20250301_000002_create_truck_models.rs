//! Create truck_models table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TruckModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TruckModels::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TruckModels::Manufacturer)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TruckModels::Name).string().not_null())
                    .col(
                        ColumnDef::new(TruckModels::CapacityTons)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TruckModels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TruckModels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TruckModels {
    Table,
    Id,
    Manufacturer,
    Name,
    CapacityTons,
    CreatedAt,
}
