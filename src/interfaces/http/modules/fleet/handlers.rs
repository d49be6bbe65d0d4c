//! Fleet reference data handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{DriverDto, FleetGroupDto, TruckModelDto};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{error_response, ApiResponse};

/// Fleet reference data state
#[derive(Clone)]
pub struct FleetState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/fleet/groups",
    tag = "Fleet",
    responses(
        (status = 200, description = "Fleet groups", body = ApiResponse<Vec<FleetGroupDto>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_groups(
    State(state): State<FleetState>,
) -> Result<Json<ApiResponse<Vec<FleetGroupDto>>>, (StatusCode, Json<ApiResponse<Vec<FleetGroupDto>>>)>
{
    match state.repos.fleet().list_groups().await {
        Ok(groups) => {
            let dtos: Vec<FleetGroupDto> =
                groups.into_iter().map(FleetGroupDto::from_domain).collect();
            Ok(Json(ApiResponse::success(dtos)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/fleet/models",
    tag = "Fleet",
    responses(
        (status = 200, description = "Truck models", body = ApiResponse<Vec<TruckModelDto>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_models(
    State(state): State<FleetState>,
) -> Result<Json<ApiResponse<Vec<TruckModelDto>>>, (StatusCode, Json<ApiResponse<Vec<TruckModelDto>>>)>
{
    match state.repos.fleet().list_models().await {
        Ok(models) => {
            let dtos: Vec<TruckModelDto> =
                models.into_iter().map(TruckModelDto::from_domain).collect();
            Ok(Json(ApiResponse::success(dtos)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/fleet/drivers",
    tag = "Fleet",
    responses(
        (status = 200, description = "Drivers", body = ApiResponse<Vec<DriverDto>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_drivers(
    State(state): State<FleetState>,
) -> Result<Json<ApiResponse<Vec<DriverDto>>>, (StatusCode, Json<ApiResponse<Vec<DriverDto>>>)> {
    match state.repos.fleet().list_drivers().await {
        Ok(drivers) => {
            let dtos: Vec<DriverDto> = drivers.into_iter().map(DriverDto::from_domain).collect();
            Ok(Json(ApiResponse::success(dtos)))
        }
        Err(e) => Err(error_response(e)),
    }
}
