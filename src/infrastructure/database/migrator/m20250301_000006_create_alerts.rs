//! Create alerts table

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
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alerts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alerts::TruckId).string().not_null())
                    .col(ColumnDef::new(Alerts::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Alerts::Severity)
                            .string()
                            .not_null()
                            .default("low"),
                    )
                    .col(ColumnDef::new(Alerts::Message).string().not_null())
                    .col(
                        ColumnDef::new(Alerts::Resolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Alerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alerts::ResolvedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alerts_truck")
                            .from(Alerts::Table, Alerts::TruckId)
                            .to(Trucks::Table, Trucks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The listing filters and the has-alerts truck filter hit these
        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_truck")
                    .table(Alerts::Table)
                    .col(Alerts::TruckId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_resolved")
                    .table(Alerts::Table)
                    .col(Alerts::Resolved)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Alerts {
    Table,
    Id,
    TruckId,
    Kind,
    Severity,
    Message,
    Resolved,
    CreatedAt,
    ResolvedAt,
}
