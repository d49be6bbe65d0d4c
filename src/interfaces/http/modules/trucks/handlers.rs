//! Truck API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateTruckRequest, HistoryQuery, LocationSampleDto, RecordTireReadingRequest,
    SetStatusRequest, TireReadingDto, TruckDetailDto, TruckDto, TruckListQuery,
    UpdateTruckRequest,
};
use crate::application::services::TruckService;
use crate::domain::{NewTruck, Position, TruckStatus, TruckUpdate};
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::modules::alerts::AlertDto;

/// Truck handler state
#[derive(Clone)]
pub struct TrucksState {
    pub service: Arc<TruckService>,
}

/// Both coordinates arrive together or not at all.
fn pair_position(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Position>, &'static str> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => Ok(Some(Position::new(lat, lng))),
        (None, None) => Ok(None),
        _ => Err("latitude and longitude must be provided together"),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/trucks",
    tag = "Trucks",
    params(TruckListQuery),
    responses(
        (status = 200, description = "Paginated truck list", body = ApiResponse<PaginatedResponse<TruckDto>>),
        (status = 400, description = "Bad filter value")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_trucks(
    State(state): State<TrucksState>,
    Query(query): Query<TruckListQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<TruckDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<TruckDto>>>),
> {
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(message) => {
            return Err((StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))));
        }
    };
    let (page, limit) = query.paging();

    match state.service.list_trucks(&filter, page, limit).await {
        Ok((trucks, total)) => {
            let items: Vec<TruckDto> = trucks.into_iter().map(TruckDto::from_domain).collect();
            Ok(Json(ApiResponse::success(PaginatedResponse::new(
                items, total, page, limit,
            ))))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/trucks",
    tag = "Trucks",
    request_body = CreateTruckRequest,
    responses(
        (status = 201, description = "Truck registered", body = ApiResponse<TruckDto>),
        (status = 409, description = "Plate already registered"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_truck(
    State(state): State<TrucksState>,
    ValidatedJson(body): ValidatedJson<CreateTruckRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TruckDto>>), (StatusCode, Json<ApiResponse<TruckDto>>)> {
    let position = match pair_position(body.latitude, body.longitude) {
        Ok(position) => position,
        Err(message) => {
            return Err((StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))));
        }
    };

    let status = match &body.status {
        Some(s) => match TruckStatus::parse(s) {
            Some(status) => Some(status),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown truck status: {}", s))),
                ));
            }
        },
        None => None,
    };

    let new_truck = NewTruck {
        plate_number: body.plate_number,
        model_id: body.model_id,
        fleet_group_id: body.fleet_group_id,
        driver_id: body.driver_id,
        status,
        position,
        fuel_level: body.fuel_level,
        payload_tons: body.payload_tons,
        odometer_km: body.odometer_km,
        engine_hours: body.engine_hours,
    };

    match state.service.create_truck(new_truck).await {
        Ok(truck) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(TruckDto::from_domain(truck))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/trucks/{truck_id}",
    tag = "Trucks",
    params(("truck_id" = String, Path, description = "Truck ID")),
    responses(
        (status = 200, description = "Truck with tires and alerts", body = ApiResponse<TruckDetailDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_truck(
    State(state): State<TrucksState>,
    Path(truck_id): Path<String>,
) -> Result<Json<ApiResponse<TruckDetailDto>>, (StatusCode, Json<ApiResponse<TruckDetailDto>>)> {
    match state.service.get_truck(&truck_id).await {
        Ok(detail) => {
            let dto = TruckDetailDto {
                truck: TruckDto::from_domain(detail.truck),
                tires: detail
                    .tires
                    .into_iter()
                    .map(TireReadingDto::from_domain)
                    .collect(),
                alerts: detail
                    .alerts
                    .into_iter()
                    .map(AlertDto::from_domain)
                    .collect(),
            };
            Ok(Json(ApiResponse::success(dto)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/trucks/{truck_id}",
    tag = "Trucks",
    params(("truck_id" = String, Path, description = "Truck ID")),
    request_body = UpdateTruckRequest,
    responses(
        (status = 200, description = "Truck updated", body = ApiResponse<TruckDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_truck(
    State(state): State<TrucksState>,
    Path(truck_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateTruckRequest>,
) -> Result<Json<ApiResponse<TruckDto>>, (StatusCode, Json<ApiResponse<TruckDto>>)> {
    let position = match pair_position(body.latitude, body.longitude) {
        Ok(position) => position,
        Err(message) => {
            return Err((StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))));
        }
    };

    let update = TruckUpdate {
        plate_number: body.plate_number,
        model_id: body.model_id,
        fleet_group_id: body.fleet_group_id,
        driver_id: body.driver_id,
        position,
        fuel_level: body.fuel_level,
        payload_tons: body.payload_tons,
        odometer_km: body.odometer_km,
        engine_hours: body.engine_hours,
    };

    match state.service.update_truck(&truck_id, update).await {
        Ok(truck) => Ok(Json(ApiResponse::success(TruckDto::from_domain(truck)))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/trucks/{truck_id}/status",
    tag = "Trucks",
    params(("truck_id" = String, Path, description = "Truck ID")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated, change broadcast", body = ApiResponse<TruckDto>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_truck_status(
    State(state): State<TrucksState>,
    Path(truck_id): Path<String>,
    ValidatedJson(body): ValidatedJson<SetStatusRequest>,
) -> Result<Json<ApiResponse<TruckDto>>, (StatusCode, Json<ApiResponse<TruckDto>>)> {
    let Some(status) = TruckStatus::parse(&body.status) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown truck status: {}",
                body.status
            ))),
        ));
    };

    match state.service.set_status(&truck_id, status).await {
        Ok(truck) => Ok(Json(ApiResponse::success(TruckDto::from_domain(truck)))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/trucks/{truck_id}",
    tag = "Trucks",
    params(("truck_id" = String, Path, description = "Truck ID")),
    responses(
        (status = 200, description = "Truck and its readings deleted"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_truck(
    State(state): State<TrucksState>,
    Path(truck_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.delete_truck(&truck_id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(error_response(e)),
    }
}

// ── Tire endpoints ─────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/trucks/{truck_id}/tires",
    tag = "Tires",
    params(("truck_id" = String, Path, description = "Truck ID")),
    responses(
        (status = 200, description = "Tire readings ordered by slot", body = ApiResponse<Vec<TireReadingDto>>),
        (status = 404, description = "Truck not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tires(
    State(state): State<TrucksState>,
    Path(truck_id): Path<String>,
) -> Result<
    Json<ApiResponse<Vec<TireReadingDto>>>,
    (StatusCode, Json<ApiResponse<Vec<TireReadingDto>>>),
> {
    match state.service.tires(&truck_id).await {
        Ok(readings) => {
            let dtos: Vec<TireReadingDto> = readings
                .into_iter()
                .map(TireReadingDto::from_domain)
                .collect();
            Ok(Json(ApiResponse::success(dtos)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/trucks/{truck_id}/tires/{slot}",
    tag = "Tires",
    params(
        ("truck_id" = String, Path, description = "Truck ID"),
        ("slot" = u32, Path, description = "Mounting slot, 1-6")
    ),
    responses(
        (status = 200, description = "Tire reading", body = ApiResponse<TireReadingDto>),
        (status = 400, description = "Slot out of range"),
        (status = 404, description = "Truck or reading not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tire(
    State(state): State<TrucksState>,
    Path((truck_id, slot)): Path<(String, u32)>,
) -> Result<Json<ApiResponse<TireReadingDto>>, (StatusCode, Json<ApiResponse<TireReadingDto>>)> {
    match state.service.tire_detail(&truck_id, slot).await {
        Ok(reading) => Ok(Json(ApiResponse::success(TireReadingDto::from_domain(
            reading,
        )))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/trucks/{truck_id}/tires/{slot}",
    tag = "Tires",
    params(
        ("truck_id" = String, Path, description = "Truck ID"),
        ("slot" = u32, Path, description = "Mounting slot, 1-6")
    ),
    request_body = RecordTireReadingRequest,
    responses(
        (status = 200, description = "Reading upserted, pressure clamped and status derived", body = ApiResponse<TireReadingDto>),
        (status = 400, description = "Slot out of range"),
        (status = 404, description = "Truck not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn put_tire(
    State(state): State<TrucksState>,
    Path((truck_id, slot)): Path<(String, u32)>,
    ValidatedJson(body): ValidatedJson<RecordTireReadingRequest>,
) -> Result<Json<ApiResponse<TireReadingDto>>, (StatusCode, Json<ApiResponse<TireReadingDto>>)> {
    match state
        .service
        .record_tire_reading(&truck_id, slot, body.pressure_psi, body.temperature_c)
        .await
    {
        Ok(reading) => Ok(Json(ApiResponse::success(TireReadingDto::from_domain(
            reading,
        )))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/trucks/{truck_id}/history",
    tag = "Trucks",
    params(
        ("truck_id" = String, Path, description = "Truck ID"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Recent location samples, newest first", body = ApiResponse<Vec<LocationSampleDto>>),
        (status = 404, description = "Truck not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn truck_history(
    State(state): State<TrucksState>,
    Path(truck_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<
    Json<ApiResponse<Vec<LocationSampleDto>>>,
    (StatusCode, Json<ApiResponse<Vec<LocationSampleDto>>>),
> {
    match state
        .service
        .history(&truck_id, query.clamped_limit())
        .await
    {
        Ok(samples) => {
            let dtos: Vec<LocationSampleDto> = samples
                .into_iter()
                .map(LocationSampleDto::from_domain)
                .collect();
            Ok(Json(ApiResponse::success(dtos)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_requires_both_coordinates() {
        assert!(pair_position(Some(41.5), None).is_err());
        assert!(pair_position(None, Some(64.6)).is_err());
        assert_eq!(pair_position(None, None), Ok(None));
        assert_eq!(
            pair_position(Some(41.5), Some(64.6)),
            Ok(Some(Position::new(41.5, 64.6)))
        );
    }
}
