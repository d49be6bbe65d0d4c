//! Create fleet_groups table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FleetGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FleetGroups::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FleetGroups::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FleetGroups::Description).string())
                    .col(
                        ColumnDef::new(FleetGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FleetGroups::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FleetGroups {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}
