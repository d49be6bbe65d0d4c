//! Location history aggregate (append-only time series)

pub mod model;
pub mod repository;

pub use model::{LocationSample, NewLocationSample};
pub use repository::LocationRepository;
