//! Truck DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::TruckListFilter;
use crate::domain::{LocationSample, TireReading, Truck, TruckStatus};
use crate::interfaces::http::modules::alerts::AlertDto;

/// Truck API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TruckDto {
    pub id: String,
    pub plate_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fleet_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    /// "active", "inactive" or "maintenance"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub heading: f64,
    pub speed_kmh: f64,
    pub fuel_level: f64,
    pub payload_tons: f64,
    pub odometer_km: f64,
    pub engine_hours: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TruckDto {
    pub fn from_domain(truck: Truck) -> Self {
        Self {
            id: truck.id,
            plate_number: truck.plate_number,
            model_id: truck.model_id,
            fleet_group_id: truck.fleet_group_id,
            driver_id: truck.driver_id,
            status: truck.status.to_string(),
            latitude: truck.position.map(|p| p.latitude),
            longitude: truck.position.map(|p| p.longitude),
            heading: truck.heading,
            speed_kmh: truck.speed_kmh,
            fuel_level: truck.fuel_level,
            payload_tons: truck.payload_tons,
            odometer_km: truck.odometer_km,
            engine_hours: truck.engine_hours,
            created_at: truck.created_at,
            updated_at: truck.updated_at,
        }
    }
}

/// Tire reading DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TireReadingDto {
    pub id: String,
    pub truck_id: String,
    /// Mounting slot, 1-6
    pub slot: u32,
    pub pressure_psi: f64,
    /// "normal", "low" or "high", derived from pressure
    pub status: String,
    pub temperature_c: f64,
    pub updated_at: DateTime<Utc>,
}

impl TireReadingDto {
    pub fn from_domain(reading: TireReading) -> Self {
        Self {
            id: reading.id,
            truck_id: reading.truck_id,
            slot: reading.slot,
            pressure_psi: reading.pressure_psi,
            status: reading.status.to_string(),
            temperature_c: reading.temperature_c,
            updated_at: reading.updated_at,
        }
    }
}

/// One truck with its tires and alerts (newest first)
#[derive(Debug, Serialize, ToSchema)]
pub struct TruckDetailDto {
    pub truck: TruckDto,
    pub tires: Vec<TireReadingDto>,
    pub alerts: Vec<AlertDto>,
}

/// Location history sample DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationSampleDto {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub heading: f64,
    pub fuel_level: f64,
    pub recorded_at: DateTime<Utc>,
}

impl LocationSampleDto {
    pub fn from_domain(sample: LocationSample) -> Self {
        Self {
            id: sample.id,
            latitude: sample.latitude,
            longitude: sample.longitude,
            speed_kmh: sample.speed_kmh,
            heading: sample.heading,
            fuel_level: sample.fuel_level,
            recorded_at: sample.recorded_at,
        }
    }
}

/// Query parameters for the truck list
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct TruckListQuery {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Filter by status: "active", "inactive" or "maintenance"
    pub status: Option<String>,
    /// Case-insensitive plate substring
    pub search: Option<String>,
    /// Minimum fuel level, percent
    pub fuel_min: Option<f64>,
    /// Maximum fuel level, percent
    pub fuel_max: Option<f64>,
    /// Only trucks with (true) / without (false) unresolved alerts
    pub has_alerts: Option<bool>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    50
}

impl Default for TruckListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            status: None,
            search: None,
            fuel_min: None,
            fuel_max: None,
            has_alerts: None,
        }
    }
}

impl TruckListQuery {
    /// Parse the filter half; a bad `status` value is a validation error.
    pub fn filter(&self) -> Result<TruckListFilter, String> {
        let status = match &self.status {
            Some(s) => match TruckStatus::parse(s) {
                Some(status) => Some(status),
                None => return Err(format!("Unknown truck status: {}", s)),
            },
            None => None,
        };
        Ok(TruckListFilter {
            status,
            search: self.search.clone(),
            fuel_min: self.fuel_min,
            fuel_max: self.fuel_max,
            has_alerts: self.has_alerts,
        })
    }

    pub fn paging(&self) -> (u64, u64) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}

/// Request to register a truck
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTruckRequest {
    #[validate(length(min = 1, max = 20, message = "plate_number must be 1-20 characters"))]
    pub plate_number: String,
    pub model_id: Option<String>,
    pub fleet_group_id: Option<String>,
    pub driver_id: Option<String>,
    /// "active", "inactive" or "maintenance". Default: "active"
    pub status: Option<String>,
    /// Both coordinates must be given together or not at all
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "fuel_level must be 0-100"))]
    pub fuel_level: Option<f64>,
    #[validate(range(min = 0.0, message = "payload_tons must be non-negative"))]
    pub payload_tons: Option<f64>,
    #[validate(range(min = 0.0, message = "odometer_km must be non-negative"))]
    pub odometer_km: Option<f64>,
    #[validate(range(min = 0.0, message = "engine_hours must be non-negative"))]
    pub engine_hours: Option<f64>,
}

/// Partial truck metadata update; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTruckRequest {
    #[validate(length(min = 1, max = 20, message = "plate_number must be 1-20 characters"))]
    pub plate_number: Option<String>,
    pub model_id: Option<String>,
    pub fleet_group_id: Option<String>,
    pub driver_id: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "fuel_level must be 0-100"))]
    pub fuel_level: Option<f64>,
    #[validate(range(min = 0.0, message = "payload_tons must be non-negative"))]
    pub payload_tons: Option<f64>,
    #[validate(range(min = 0.0, message = "odometer_km must be non-negative"))]
    pub odometer_km: Option<f64>,
    #[validate(range(min = 0.0, message = "engine_hours must be non-negative"))]
    pub engine_hours: Option<f64>,
}

/// Status mutation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetStatusRequest {
    /// "active", "inactive" or "maintenance"
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Manual tire reading upsert; pressure is clamped and status derived
/// server-side
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordTireReadingRequest {
    pub pressure_psi: f64,
    #[validate(range(min = -60.0, max = 150.0, message = "temperature_c out of range"))]
    pub temperature_c: f64,
}

/// Query parameters for location history
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct HistoryQuery {
    /// Number of most recent samples. Default: 100, max 1000
    #[serde(default = "default_history_limit")]
    pub limit: u64,
}

fn default_history_limit() -> u64 {
    100
}

impl HistoryQuery {
    pub fn clamped_limit(&self) -> u64 {
        self.limit.clamp(1, 1000)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;

    fn sample_truck(position: Option<Position>) -> Truck {
        Truck {
            id: "t-001".to_string(),
            plate_number: "01 777 AAA".to_string(),
            model_id: Some("m-1".to_string()),
            fleet_group_id: None,
            driver_id: None,
            status: TruckStatus::Active,
            position,
            heading: 90.0,
            speed_kmh: 32.5,
            fuel_level: 74.0,
            payload_tons: 90.0,
            odometer_km: 120_500.0,
            engine_hours: 8_100.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn truck_dto_carries_position_as_flat_coordinates() {
        let dto = TruckDto::from_domain(sample_truck(Some(Position::new(41.5, 64.6))));
        assert_eq!(dto.latitude, Some(41.5));
        assert_eq!(dto.longitude, Some(64.6));
        assert_eq!(dto.status, "active");
    }

    #[test]
    fn truck_without_position_omits_coordinate_keys() {
        let dto = TruckDto::from_domain(sample_truck(None));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("latitude").is_none());
        assert!(json.get("longitude").is_none());
    }

    #[test]
    fn list_query_rejects_unknown_status() {
        let query = TruckListQuery {
            status: Some("flying".to_string()),
            ..TruckListQuery::default()
        };
        assert!(query.filter().is_err());

        let query = TruckListQuery {
            status: Some("maintenance".to_string()),
            ..TruckListQuery::default()
        };
        let filter = query.filter().unwrap();
        assert_eq!(filter.status, Some(TruckStatus::Maintenance));
    }

    #[test]
    fn list_query_paging_is_clamped() {
        let query = TruckListQuery {
            page: 0,
            limit: 9999,
            ..TruckListQuery::default()
        };
        assert_eq!(query.paging(), (1, 100));
    }
}
