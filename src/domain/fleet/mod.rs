//! Fleet reference data: groups, truck models, drivers

pub mod model;
pub mod repository;

pub use model::{Driver, FleetGroup, NewDriver, NewFleetGroup, NewTruckModel, TruckModel};
pub use repository::FleetRepository;
