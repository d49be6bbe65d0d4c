//! Interface adapters: HTTP REST API and the WebSocket gateway

pub mod http;
pub mod ws;
