//! Alert aggregate

pub mod model;
pub mod repository;

pub use model::{Alert, AlertSeverity, NewAlert};
pub use repository::AlertRepository;
