//! Trucks module — fleet CRUD, status mutation, tires, location history

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
