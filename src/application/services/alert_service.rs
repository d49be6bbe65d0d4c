//! Alert business logic service

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::application::events::SharedEventBus;
use crate::domain::alert::{Alert, AlertSeverity, NewAlert};
use crate::domain::events::{AlertResolvedEvent, Event, NewAlertEvent};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};

/// Filters for the alert listing endpoint
#[derive(Debug, Clone, Default)]
pub struct AlertListFilter {
    pub resolved: Option<bool>,
    pub severity: Option<AlertSeverity>,
    pub truck_id: Option<String>,
}

/// Service for raising, listing and resolving alerts
pub struct AlertService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl AlertService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    /// List alerts newest first. Returns the page slice and the total
    /// match count before paging.
    pub async fn list_alerts(
        &self,
        filter: &AlertListFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Alert>, u64)> {
        let alerts = self.repos.alerts().find_all().await?;

        let matched: Vec<Alert> = alerts
            .into_iter()
            .filter(|alert| filter_matches(filter, alert))
            .collect();
        let total = matched.len() as u64;

        let offset = page.saturating_sub(1).saturating_mul(limit);
        let page_items = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok((page_items, total))
    }

    pub async fn get_alert(&self, id: &str) -> DomainResult<Alert> {
        self.repos
            .alerts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Alert", "id", id))
    }

    /// Raise an alert for a truck and broadcast it.
    pub async fn create_alert(&self, new: NewAlert) -> DomainResult<Alert> {
        if self
            .repos
            .trucks()
            .find_by_id(&new.truck_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Truck", "id", &new.truck_id));
        }

        let alert = self.repos.alerts().create(new).await?;

        self.event_bus.publish(Event::NewAlert(NewAlertEvent {
            alert_id: alert.id.clone(),
            truck_id: alert.truck_id.clone(),
            kind: alert.kind.clone(),
            severity: alert.severity.to_string(),
            message: alert.message.clone(),
            timestamp: Utc::now(),
        }));

        info!(
            "Alert raised for truck {}: [{}] {}",
            alert.truck_id, alert.severity, alert.message
        );
        Ok(alert)
    }

    /// Resolve an alert. Idempotent: resolving an already-resolved alert
    /// returns it unchanged and broadcasts nothing.
    pub async fn resolve_alert(&self, id: &str) -> DomainResult<Alert> {
        let (alert, transitioned) = self.repos.alerts().resolve(id).await?;

        if transitioned {
            self.event_bus
                .publish(Event::AlertResolved(AlertResolvedEvent {
                    alert_id: alert.id.clone(),
                    truck_id: alert.truck_id.clone(),
                    timestamp: Utc::now(),
                }));
            info!("Alert {} resolved (truck {})", alert.id, alert.truck_id);
        }

        Ok(alert)
    }
}

fn filter_matches(filter: &AlertListFilter, alert: &Alert) -> bool {
    if let Some(resolved) = filter.resolved {
        if alert.resolved != resolved {
            return false;
        }
    }
    if let Some(severity) = filter.severity {
        if alert.severity != severity {
            return false;
        }
    }
    if let Some(truck_id) = &filter.truck_id {
        if &alert.truck_id != truck_id {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn alert(id: &str, truck_id: &str, severity: AlertSeverity, resolved: bool) -> Alert {
        Alert {
            id: id.to_string(),
            truck_id: truck_id.to_string(),
            kind: "tire_pressure".to_string(),
            severity,
            message: "Front-left tire below threshold".to_string(),
            resolved,
            created_at: Utc::now(),
            resolved_at: resolved.then(Utc::now),
        }
    }

    #[test]
    fn filter_matches_resolved_flag() {
        let open_only = AlertListFilter {
            resolved: Some(false),
            ..AlertListFilter::default()
        };
        assert!(filter_matches(
            &open_only,
            &alert("a-1", "t-1", AlertSeverity::High, false)
        ));
        assert!(!filter_matches(
            &open_only,
            &alert("a-2", "t-1", AlertSeverity::High, true)
        ));
    }

    #[test]
    fn filter_matches_severity_and_truck() {
        let filter = AlertListFilter {
            severity: Some(AlertSeverity::Critical),
            truck_id: Some("t-7".to_string()),
            ..AlertListFilter::default()
        };
        assert!(filter_matches(
            &filter,
            &alert("a-1", "t-7", AlertSeverity::Critical, false)
        ));
        assert!(!filter_matches(
            &filter,
            &alert("a-2", "t-7", AlertSeverity::Low, false)
        ));
        assert!(!filter_matches(
            &filter,
            &alert("a-3", "t-8", AlertSeverity::Critical, false)
        ));
    }
}
