//! Monitoring API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::{GatewayStatsDto, SimulatorStatsDto};
use crate::application::events::SharedEventBus;
use crate::application::services::PositionSimulator;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::ws::SharedClientRegistry;

/// Monitoring state
#[derive(Clone)]
pub struct MonitoringState {
    pub simulator: Option<Arc<PositionSimulator>>,
    pub clients: SharedClientRegistry,
    pub event_bus: SharedEventBus,
}

#[utoipa::path(
    get,
    path = "/api/v1/monitoring/simulator",
    responses(
        (status = 200, description = "Simulator tick counters", body = ApiResponse<SimulatorStatsDto>)
    ),
    security(("bearer_auth" = [])),
    tag = "Monitoring"
)]
pub async fn get_simulator_stats(
    State(state): State<MonitoringState>,
) -> Json<ApiResponse<SimulatorStatsDto>> {
    match &state.simulator {
        Some(simulator) => {
            let stats = simulator.stats().await;
            Json(ApiResponse::success(SimulatorStatsDto::from_stats(stats)))
        }
        None => Json(ApiResponse::error("Simulator is disabled")),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/monitoring/gateway",
    responses(
        (status = 200, description = "Gateway connection stats", body = ApiResponse<GatewayStatsDto>)
    ),
    security(("bearer_auth" = [])),
    tag = "Monitoring"
)]
pub async fn get_gateway_stats(
    State(state): State<MonitoringState>,
) -> Json<ApiResponse<GatewayStatsDto>> {
    let dto = GatewayStatsDto {
        connected_clients: state.clients.connected_count(),
        subscriptions: state.clients.channel_counts(),
        bus_subscribers: state.event_bus.subscriber_count(),
    };
    Json(ApiResponse::success(dto))
}
