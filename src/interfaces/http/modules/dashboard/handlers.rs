//! Dashboard handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::DashboardStatsDto;
use crate::application::services::TruckService;
use crate::interfaces::http::common::{error_response, ApiResponse};

/// Dashboard handler state
#[derive(Clone)]
pub struct DashboardState {
    pub service: Arc<TruckService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Aggregate fleet counts", body = ApiResponse<DashboardStatsDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_stats(
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, (StatusCode, Json<ApiResponse<DashboardStatsDto>>)>
{
    match state.service.dashboard_stats().await {
        Ok(stats) => Ok(Json(ApiResponse::success(DashboardStatsDto::from_domain(
            stats,
        )))),
        Err(e) => Err(error_response(e)),
    }
}
