//! Fleet reference data module — groups, models, drivers

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
