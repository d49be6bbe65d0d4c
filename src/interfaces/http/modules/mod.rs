
pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod fleet;
pub mod health;
pub mod metrics;
pub mod monitoring;
pub mod request_id;
pub mod trucks;
