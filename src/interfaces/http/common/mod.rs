//! Shared HTTP plumbing: response envelope, pagination, validation

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::errors::DomainError;

/// Uniform response envelope for every REST endpoint.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "message": "reason"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request was handled successfully
    pub success: bool,
    /// Payload, absent on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure description, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Map a domain error to its HTTP status and envelope.
///
/// Database and other internal failures are logged here and returned as
/// a generic 500; the underlying cause never reaches the client.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let (status, message) = match &err {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
        DomainError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, err.to_string()),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
        DomainError::Internal(_) | DomainError::Infra(_) => {
            error!("Request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}

/// Pagination query parameters for list endpoints
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PaginationParams {
    /// Page floored at 1, limit clamped into 1..=100.
    pub fn clamped(&self) -> (u64, u64) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    50
}

/// One page of a list endpoint, wrapped in the envelope as `data`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_no_message_key() {
        let body = serde_json::to_value(ApiResponse::success(7u32)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 7);
        assert!(body.get("message").is_none());
    }

    #[test]
    fn error_envelope_has_no_data_key() {
        let body = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "boom");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn pagination_defaults_and_clamping() {
        let params = PaginationParams::default();
        assert_eq!(params.clamped(), (1, 50));

        let params = PaginationParams { page: 0, limit: 500 };
        assert_eq!(params.clamped(), (1, 100));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 101, 1, 50);
        assert_eq!(page.total_pages, 3);

        let empty: PaginatedResponse<u32> = PaginatedResponse::new(vec![], 0, 1, 50);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, body) =
            error_response::<()>(DomainError::not_found("Truck", "id", "t-9"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0.message.as_deref(), Some("Not found: Truck with id=t-9"));
    }

    #[test]
    fn internal_errors_are_not_leaked() {
        let (status, body) =
            error_response::<()>(DomainError::Internal("db password wrong".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0.message.as_deref(), Some("Internal server error"));
    }
}
