//! Truck domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::{DomainError, DomainResult};

/// Truck operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruckStatus {
    /// In service, eligible for position simulation
    Active,
    /// Parked / out of rotation
    Inactive,
    /// In the workshop
    Maintenance,
}

impl Default for TruckStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl TruckStatus {
    /// Strict parse: the API rejects anything outside the three states.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    pub const ALL: [TruckStatus; 3] = [Self::Active, Self::Inactive, Self::Maintenance];
}

/// Geographic position of a truck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from a pair of optional coordinates.
    ///
    /// Latitude and longitude travel together: exactly one being set is a
    /// validation error, both absent means "no position yet".
    pub fn from_pair(latitude: Option<f64>, longitude: Option<f64>) -> DomainResult<Option<Self>> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(DomainError::Validation(format!(
                        "latitude {lat} out of range [-90, 90]"
                    )));
                }
                if !(-180.0..=180.0).contains(&lng) {
                    return Err(DomainError::Validation(format!(
                        "longitude {lng} out of range [-180, 180]"
                    )));
                }
                Ok(Some(Self::new(lat, lng)))
            }
            (None, None) => Ok(None),
            _ => Err(DomainError::Validation(
                "latitude and longitude must be provided together".to_string(),
            )),
        }
    }
}

/// Truck entity
#[derive(Debug, Clone)]
pub struct Truck {
    /// Unique identifier (UUID)
    pub id: String,
    /// Registration plate, unique across the fleet
    pub plate_number: String,
    /// Reference to the truck model (make/capacity)
    pub model_id: Option<String>,
    /// Fleet group the truck is assigned to
    pub fleet_group_id: Option<String>,
    /// Currently assigned driver, if any
    pub driver_id: Option<String>,
    /// Operational status
    pub status: TruckStatus,
    /// Last known position (both coordinates or neither)
    pub position: Option<Position>,
    /// Heading in degrees, [0, 360)
    pub heading: f64,
    /// Last reported speed, km/h
    pub speed_kmh: f64,
    /// Fuel level, percent 0-100
    pub fuel_level: f64,
    /// Rated payload, tons
    pub payload_tons: f64,
    /// Odometer, km
    pub odometer_km: f64,
    /// Engine hour counter
    pub engine_hours: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Truck {
    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// Whether the simulator may pick this truck in a tick.
    pub fn is_simulation_candidate(&self) -> bool {
        self.status == TruckStatus::Active && self.position.is_some()
    }
}

/// Data for creating a truck
#[derive(Debug, Clone, Default)]
pub struct NewTruck {
    pub plate_number: String,
    pub model_id: Option<String>,
    pub fleet_group_id: Option<String>,
    pub driver_id: Option<String>,
    pub status: Option<TruckStatus>,
    pub position: Option<Position>,
    pub fuel_level: Option<f64>,
    pub payload_tons: Option<f64>,
    pub odometer_km: Option<f64>,
    pub engine_hours: Option<f64>,
}

/// Partial metadata update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TruckUpdate {
    pub plate_number: Option<String>,
    pub model_id: Option<String>,
    pub fleet_group_id: Option<String>,
    pub driver_id: Option<String>,
    pub position: Option<Position>,
    pub fuel_level: Option<f64>,
    pub payload_tons: Option<f64>,
    pub odometer_km: Option<f64>,
    pub engine_hours: Option<f64>,
}

/// One tick's worth of simulated movement, persisted as a single
/// atomic row update together with `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryUpdate {
    pub position: Position,
    pub speed_kmh: f64,
    pub heading: f64,
    pub fuel_level: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_truck() -> Truck {
        Truck {
            id: "t-001".to_string(),
            plate_number: "01 777 AAA".to_string(),
            model_id: None,
            fleet_group_id: None,
            driver_id: None,
            status: TruckStatus::Active,
            position: Some(Position::new(41.48, 64.58)),
            heading: 90.0,
            speed_kmh: 32.0,
            fuel_level: 74.0,
            payload_tons: 90.0,
            odometer_km: 120_500.0,
            engine_hours: 8_100.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_parse_is_strict() {
        assert_eq!(TruckStatus::parse("active"), Some(TruckStatus::Active));
        assert_eq!(TruckStatus::parse("MAINTENANCE"), Some(TruckStatus::Maintenance));
        assert_eq!(TruckStatus::parse("parked"), None);
        assert_eq!(TruckStatus::parse(""), None);
    }

    #[test]
    fn status_display_round_trips() {
        for status in TruckStatus::ALL {
            assert_eq!(TruckStatus::parse(&status.to_string()), Some(status));
        }
    }

    #[test]
    fn position_pair_requires_both() {
        assert!(Position::from_pair(Some(41.0), None).is_err());
        assert!(Position::from_pair(None, Some(64.0)).is_err());
        assert!(Position::from_pair(None, None).unwrap().is_none());
        let p = Position::from_pair(Some(41.48), Some(64.58)).unwrap().unwrap();
        assert_eq!(p.latitude, 41.48);
        assert_eq!(p.longitude, 64.58);
    }

    #[test]
    fn position_pair_rejects_out_of_range() {
        assert!(Position::from_pair(Some(91.0), Some(0.0)).is_err());
        assert!(Position::from_pair(Some(0.0), Some(-181.0)).is_err());
    }

    #[test]
    fn active_truck_with_position_is_candidate() {
        let truck = sample_truck();
        assert!(truck.is_simulation_candidate());
    }

    #[test]
    fn inactive_or_positionless_truck_is_not_candidate() {
        let mut parked = sample_truck();
        parked.status = TruckStatus::Inactive;
        assert!(!parked.is_simulation_candidate());

        let mut unplaced = sample_truck();
        unplaced.position = None;
        assert!(!unplaced.is_simulation_candidate());
    }
}
