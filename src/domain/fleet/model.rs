//! Fleet reference entities (read-mostly lookup data)

use chrono::{DateTime, Utc};

/// Logical grouping of trucks (e.g. "North Pit Haul", "Stripping")
#[derive(Debug, Clone)]
pub struct FleetGroup {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFleetGroup {
    pub name: String,
    pub description: Option<String>,
}

/// Truck make/model with rated capacity
#[derive(Debug, Clone)]
pub struct TruckModel {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    pub capacity_tons: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTruckModel {
    pub manufacturer: String,
    pub name: String,
    pub capacity_tons: f64,
}

/// Operator on the roster; optionally assigned to a truck
#[derive(Debug, Clone)]
pub struct Driver {
    pub id: String,
    pub full_name: String,
    pub license_class: String,
    /// "day" / "night" when on a fixed rotation
    pub shift: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub full_name: String,
    pub license_class: String,
    pub shift: Option<String>,
}
