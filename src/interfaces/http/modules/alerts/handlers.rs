//! Alert API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{AlertDto, AlertListQuery, CreateAlertRequest};
use crate::application::services::AlertService;
use crate::domain::{AlertSeverity, NewAlert};
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};

/// Alert handler state
#[derive(Clone)]
pub struct AlertsState {
    pub service: Arc<AlertService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    tag = "Alerts",
    params(AlertListQuery),
    responses(
        (status = 200, description = "Paginated alert list, newest first", body = ApiResponse<PaginatedResponse<AlertDto>>),
        (status = 400, description = "Bad filter value")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_alerts(
    State(state): State<AlertsState>,
    Query(query): Query<AlertListQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<AlertDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<AlertDto>>>),
> {
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(message) => {
            return Err((StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))));
        }
    };
    let (page, limit) = query.paging();

    match state.service.list_alerts(&filter, page, limit).await {
        Ok((alerts, total)) => {
            let items: Vec<AlertDto> = alerts.into_iter().map(AlertDto::from_domain).collect();
            Ok(Json(ApiResponse::success(PaginatedResponse::new(
                items, total, page, limit,
            ))))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/alerts",
    tag = "Alerts",
    request_body = CreateAlertRequest,
    responses(
        (status = 201, description = "Alert raised and broadcast", body = ApiResponse<AlertDto>),
        (status = 400, description = "Unknown severity"),
        (status = 404, description = "Truck not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_alert(
    State(state): State<AlertsState>,
    ValidatedJson(body): ValidatedJson<CreateAlertRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AlertDto>>), (StatusCode, Json<ApiResponse<AlertDto>>)> {
    let Some(severity) = AlertSeverity::parse(&body.severity) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown alert severity: {}",
                body.severity
            ))),
        ));
    };

    let new_alert = NewAlert {
        truck_id: body.truck_id,
        kind: body.kind,
        severity,
        message: body.message,
    };

    match state.service.create_alert(new_alert).await {
        Ok(alert) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(AlertDto::from_domain(alert))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/alerts/{alert_id}",
    tag = "Alerts",
    params(("alert_id" = String, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert details", body = ApiResponse<AlertDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_alert(
    State(state): State<AlertsState>,
    Path(alert_id): Path<String>,
) -> Result<Json<ApiResponse<AlertDto>>, (StatusCode, Json<ApiResponse<AlertDto>>)> {
    match state.service.get_alert(&alert_id).await {
        Ok(alert) => Ok(Json(ApiResponse::success(AlertDto::from_domain(alert)))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/alerts/{alert_id}/resolve",
    tag = "Alerts",
    params(("alert_id" = String, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert resolved (idempotent)", body = ApiResponse<AlertDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn resolve_alert(
    State(state): State<AlertsState>,
    Path(alert_id): Path<String>,
) -> Result<Json<ApiResponse<AlertDto>>, (StatusCode, Json<ApiResponse<AlertDto>>)> {
    match state.service.resolve_alert(&alert_id).await {
        Ok(alert) => Ok(Json(ApiResponse::success(AlertDto::from_domain(alert)))),
        Err(e) => Err(error_response(e)),
    }
}
