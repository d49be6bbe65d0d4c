//! Location history sample

use chrono::{DateTime, Utc};

use crate::domain::truck::TelemetryUpdate;

/// One immutable point of a truck's track. Written by the simulator tick
/// and by history-backfill jobs; never updated, pruned only by retention
/// cleanup.
#[derive(Debug, Clone)]
pub struct LocationSample {
    pub id: i64,
    pub truck_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub heading: f64,
    pub fuel_level: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Sample data before insertion (id assigned by the store)
#[derive(Debug, Clone)]
pub struct NewLocationSample {
    pub truck_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub heading: f64,
    pub fuel_level: f64,
    pub recorded_at: DateTime<Utc>,
}

impl NewLocationSample {
    /// Snapshot of one tick's telemetry for the history table.
    pub fn from_telemetry(
        truck_id: impl Into<String>,
        telemetry: &TelemetryUpdate,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            truck_id: truck_id.into(),
            latitude: telemetry.position.latitude,
            longitude: telemetry.position.longitude,
            speed_kmh: telemetry.speed_kmh,
            heading: telemetry.heading,
            fuel_level: telemetry.fuel_level,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::truck::Position;

    #[test]
    fn from_telemetry_copies_all_fields() {
        let telemetry = TelemetryUpdate {
            position: Position::new(41.47, 64.6),
            speed_kmh: 44.0,
            heading: 182.5,
            fuel_level: 63.2,
        };
        let at = Utc::now();
        let sample = NewLocationSample::from_telemetry("t-001", &telemetry, at);
        assert_eq!(sample.truck_id, "t-001");
        assert_eq!(sample.latitude, 41.47);
        assert_eq!(sample.longitude, 64.6);
        assert_eq!(sample.speed_kmh, 44.0);
        assert_eq!(sample.heading, 182.5);
        assert_eq!(sample.fuel_level, 63.2);
        assert_eq!(sample.recorded_at, at);
    }
}
