//! Alerts module — alert lifecycle: create, list, resolve

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
