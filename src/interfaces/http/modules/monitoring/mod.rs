//! Monitoring module — simulator and gateway runtime stats

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
