//! Truck entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trucks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub plate_number: String,

    #[sea_orm(nullable)]
    pub model_id: Option<String>,

    #[sea_orm(nullable)]
    pub fleet_group_id: Option<String>,

    #[sea_orm(nullable)]
    pub driver_id: Option<String>,

    /// Status: active, inactive, maintenance
    pub status: String,

    /// Position columns are set and cleared together, never one at a time
    #[sea_orm(nullable)]
    pub latitude: Option<f64>,

    #[sea_orm(nullable)]
    pub longitude: Option<f64>,

    pub heading: f64,
    pub speed_kmh: f64,
    pub fuel_level: f64,
    pub payload_tons: f64,
    pub odometer_km: f64,
    pub engine_hours: f64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tire_reading::Entity")]
    TireReadings,
    #[sea_orm(has_many = "super::alert::Entity")]
    Alerts,
    #[sea_orm(has_many = "super::location_sample::Entity")]
    LocationSamples,
    #[sea_orm(
        belongs_to = "super::truck_model::Entity",
        from = "Column::ModelId",
        to = "super::truck_model::Column::Id"
    )]
    TruckModel,
    #[sea_orm(
        belongs_to = "super::fleet_group::Entity",
        from = "Column::FleetGroupId",
        to = "super::fleet_group::Column::Id"
    )]
    FleetGroup,
    #[sea_orm(
        belongs_to = "super::driver::Entity",
        from = "Column::DriverId",
        to = "super::driver::Column::Id"
    )]
    Driver,
}

impl Related<super::tire_reading::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TireReadings.def()
    }
}

impl Related<super::alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl Related<super::location_sample::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationSamples.def()
    }
}

impl Related<super::truck_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TruckModel.def()
    }
}

impl Related<super::fleet_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetGroup.def()
    }
}

impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
