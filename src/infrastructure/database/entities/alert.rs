//! Alert entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub truck_id: String,

    /// Alert category, e.g. "tire_pressure", "fuel_low"
    pub kind: String,

    /// Severity: low, medium, high, critical
    pub severity: String,

    pub message: String,

    pub resolved: bool,

    pub created_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::truck::Entity",
        from = "Column::TruckId",
        to = "super::truck::Column::Id"
    )]
    Truck,
}

impl Related<super::truck::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Truck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
