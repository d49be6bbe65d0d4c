//! Alert DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::AlertListFilter;
use crate::domain::{Alert, AlertSeverity};

/// Alert API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlertDto {
    pub id: String,
    pub truck_id: String,
    /// Category, e.g. "tire_pressure", "fuel_low"
    pub kind: String,
    /// "low", "medium", "high" or "critical"
    pub severity: String,
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl AlertDto {
    pub fn from_domain(alert: Alert) -> Self {
        Self {
            id: alert.id,
            truck_id: alert.truck_id,
            kind: alert.kind,
            severity: alert.severity.to_string(),
            message: alert.message,
            resolved: alert.resolved,
            created_at: alert.created_at,
            resolved_at: alert.resolved_at,
        }
    }
}

/// Query parameters for the alert list
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AlertListQuery {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Only resolved (true) or only open (false) alerts
    pub resolved: Option<bool>,
    /// Filter by severity: "low", "medium", "high" or "critical"
    pub severity: Option<String>,
    /// Filter by truck
    pub truck_id: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    50
}

impl Default for AlertListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            resolved: None,
            severity: None,
            truck_id: None,
        }
    }
}

impl AlertListQuery {
    pub fn filter(&self) -> Result<AlertListFilter, String> {
        let severity = match &self.severity {
            Some(s) => match AlertSeverity::parse(s) {
                Some(severity) => Some(severity),
                None => return Err(format!("Unknown alert severity: {}", s)),
            },
            None => None,
        };
        Ok(AlertListFilter {
            resolved: self.resolved,
            severity,
            truck_id: self.truck_id.clone(),
        })
    }

    pub fn paging(&self) -> (u64, u64) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}

/// Request to raise an alert
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlertRequest {
    #[validate(length(min = 1, message = "truck_id is required"))]
    pub truck_id: String,
    /// Category, e.g. "tire_pressure", "fuel_low"
    #[validate(length(min = 1, max = 50, message = "kind must be 1-50 characters"))]
    pub kind: String,
    /// "low", "medium", "high" or "critical"
    #[validate(length(min = 1, message = "severity is required"))]
    pub severity: String,
    #[validate(length(min = 1, max = 500, message = "message must be 1-500 characters"))]
    pub message: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_dto_serializes_severity_lowercase() {
        let dto = AlertDto::from_domain(Alert {
            id: "a-1".to_string(),
            truck_id: "t-1".to_string(),
            kind: "tire_pressure".to_string(),
            severity: AlertSeverity::Critical,
            message: "Tire 3 below 80 psi".to_string(),
            resolved: false,
            created_at: Utc::now(),
            resolved_at: None,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["severity"], "critical");
        assert!(json.get("resolved_at").is_none());
    }

    #[test]
    fn list_query_rejects_unknown_severity() {
        let query = AlertListQuery {
            severity: Some("apocalyptic".to_string()),
            ..AlertListQuery::default()
        };
        assert!(query.filter().is_err());

        let query = AlertListQuery {
            severity: Some("high".to_string()),
            resolved: Some(false),
            ..AlertListQuery::default()
        };
        let filter = query.filter().unwrap();
        assert_eq!(filter.severity, Some(AlertSeverity::High));
        assert_eq!(filter.resolved, Some(false));
    }
}
