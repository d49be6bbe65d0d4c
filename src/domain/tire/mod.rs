//! Tire pressure aggregate
//!
//! Six canonical mounting slots per truck, one reading per slot.

pub mod model;
pub mod repository;

pub use model::{
    clamp_pressure, shifted_pressure, TireReading, TireStatus, PRESSURE_HIGH_PSI,
    PRESSURE_LOW_PSI, PRESSURE_MAX_PSI, PRESSURE_MIN_PSI, SLOT_COUNT,
};
pub use repository::TireRepository;
