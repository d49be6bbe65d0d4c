//! Database entities module

pub mod alert;
pub mod driver;
pub mod fleet_group;
pub mod location_sample;
pub mod tire_reading;
pub mod truck;
pub mod truck_model;
pub mod user;

pub use alert::Entity as Alert;
pub use driver::Entity as Driver;
pub use fleet_group::Entity as FleetGroup;
pub use location_sample::Entity as LocationSample;
pub use tire_reading::Entity as TireReading;
pub use truck::Entity as Truck;
pub use truck_model::Entity as TruckModel;
pub use user::Entity as User;
