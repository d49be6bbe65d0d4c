//! Tire pressure domain types

use chrono::{DateTime, Utc};

/// Canonical mounting slots per truck, numbered 1..=SLOT_COUNT
pub const SLOT_COUNT: u32 = 6;

/// Physical clamp range for any stored pressure
pub const PRESSURE_MIN_PSI: f64 = 50.0;
pub const PRESSURE_MAX_PSI: f64 = 150.0;

/// Status thresholds: below LOW is `low`, above HIGH is `high`
pub const PRESSURE_LOW_PSI: f64 = 80.0;
pub const PRESSURE_HIGH_PSI: f64 = 120.0;

/// Derived tire status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TireStatus {
    Normal,
    Low,
    High,
}

impl TireStatus {
    /// Status is always a pure function of pressure.
    pub fn from_pressure(pressure_psi: f64) -> Self {
        if pressure_psi < PRESSURE_LOW_PSI {
            Self::Low
        } else if pressure_psi > PRESSURE_HIGH_PSI {
            Self::High
        } else {
            Self::Normal
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "low" => Some(Self::Low),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for TireStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Clamp a pressure into the physical range.
pub fn clamp_pressure(pressure_psi: f64) -> f64 {
    pressure_psi.clamp(PRESSURE_MIN_PSI, PRESSURE_MAX_PSI)
}

/// Apply a signed delta to a pressure: clamp, then derive the new status.
/// The simulator applies the SAME delta to all slots of a truck.
pub fn shifted_pressure(current_psi: f64, delta_psi: f64) -> (f64, TireStatus) {
    let pressure = clamp_pressure(current_psi + delta_psi);
    (pressure, TireStatus::from_pressure(pressure))
}

/// One tire reading, unique per (truck, slot)
#[derive(Debug, Clone)]
pub struct TireReading {
    pub id: String,
    pub truck_id: String,
    /// Mounting position, 1..=6
    pub slot: u32,
    pub pressure_psi: f64,
    pub status: TireStatus,
    pub temperature_c: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TireReading {
    /// Invariant check: stored status matches the thresholds.
    pub fn is_consistent(&self) -> bool {
        self.status == TireStatus::from_pressure(self.pressure_psi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(TireStatus::from_pressure(79.9), TireStatus::Low);
        assert_eq!(TireStatus::from_pressure(80.0), TireStatus::Normal);
        assert_eq!(TireStatus::from_pressure(100.0), TireStatus::Normal);
        assert_eq!(TireStatus::from_pressure(120.0), TireStatus::Normal);
        assert_eq!(TireStatus::from_pressure(120.1), TireStatus::High);
    }

    #[test]
    fn clamp_respects_physical_range() {
        assert_eq!(clamp_pressure(20.0), PRESSURE_MIN_PSI);
        assert_eq!(clamp_pressure(200.0), PRESSURE_MAX_PSI);
        assert_eq!(clamp_pressure(95.5), 95.5);
    }

    #[test]
    fn clamp_is_idempotent() {
        for psi in [-10.0, 49.9, 50.0, 100.0, 150.0, 500.0] {
            assert_eq!(clamp_pressure(clamp_pressure(psi)), clamp_pressure(psi));
        }
    }

    #[test]
    fn shift_clamps_and_recomputes_status() {
        let (p, s) = shifted_pressure(149.5, 2.0);
        assert_eq!(p, PRESSURE_MAX_PSI);
        assert_eq!(s, TireStatus::High);

        let (p, s) = shifted_pressure(81.0, -2.0);
        assert_eq!(p, 79.0);
        assert_eq!(s, TireStatus::Low);

        let (p, s) = shifted_pressure(100.0, 1.5);
        assert_eq!(p, 101.5);
        assert_eq!(s, TireStatus::Normal);
    }

    #[test]
    fn reading_consistency_check() {
        let now = Utc::now();
        let reading = TireReading {
            id: "r-1".to_string(),
            truck_id: "t-001".to_string(),
            slot: 1,
            pressure_psi: 75.0,
            status: TireStatus::Low,
            temperature_c: 40.0,
            created_at: now,
            updated_at: now,
        };
        assert!(reading.is_consistent());

        let mut stale = reading.clone();
        stale.status = TireStatus::Normal;
        assert!(!stale.is_consistent());
    }
}
