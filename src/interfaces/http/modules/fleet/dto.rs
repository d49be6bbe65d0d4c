//! Fleet reference data DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Driver, FleetGroup, TruckModel};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FleetGroupDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FleetGroupDto {
    pub fn from_domain(group: FleetGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
            created_at: group.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TruckModelDto {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    pub capacity_tons: f64,
    pub created_at: DateTime<Utc>,
}

impl TruckModelDto {
    pub fn from_domain(model: TruckModel) -> Self {
        Self {
            id: model.id,
            manufacturer: model.manufacturer,
            name: model.name,
            capacity_tons: model.capacity_tons,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DriverDto {
    pub id: String,
    pub full_name: String,
    pub license_class: String,
    /// "day" / "night" when on a fixed rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DriverDto {
    pub fn from_domain(driver: Driver) -> Self {
        Self {
            id: driver.id,
            full_name: driver.full_name,
            license_class: driver.license_class,
            shift: driver.shift,
            created_at: driver.created_at,
        }
    }
}
