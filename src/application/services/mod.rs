//! Application services

mod alert_service;
mod position_simulator;
mod truck_service;

pub use alert_service::{AlertListFilter, AlertService};
pub use position_simulator::{PositionSimulator, SimulatorConfig, SimulatorStats};
pub use truck_service::{
    DashboardStats, OpenAlertCounts, TruckDetail, TruckListFilter, TruckService,
};
