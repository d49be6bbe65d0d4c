//! Truck business logic service

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::application::events::SharedEventBus;
use crate::domain::alert::{Alert, AlertSeverity};
use crate::domain::events::{Event, StatusChangedEvent};
use crate::domain::location::LocationSample;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::tire::{TireReading, TireStatus, SLOT_COUNT};
use crate::domain::truck::{NewTruck, Truck, TruckStatus, TruckUpdate};
use crate::domain::{DomainError, DomainResult};

/// Filters for the truck listing endpoint
#[derive(Debug, Clone, Default)]
pub struct TruckListFilter {
    pub status: Option<TruckStatus>,
    /// Case-insensitive substring match on the plate number
    pub search: Option<String>,
    pub fuel_min: Option<f64>,
    pub fuel_max: Option<f64>,
    /// Only trucks with (true) or without (false) unresolved alerts
    pub has_alerts: Option<bool>,
}

/// One truck joined with its tire readings and alert history
#[derive(Debug, Clone)]
pub struct TruckDetail {
    pub truck: Truck,
    pub tires: Vec<TireReading>,
    pub alerts: Vec<Alert>,
}

/// Unresolved alert counts broken down by severity
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAlertCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

impl OpenAlertCounts {
    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high + self.critical
    }
}

/// Aggregate numbers for the dashboard endpoint
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_trucks: u64,
    pub active_trucks: u64,
    pub inactive_trucks: u64,
    pub maintenance_trucks: u64,
    pub trucks_with_position: u64,
    pub average_fuel_level: f64,
    /// Combined rated payload of active trucks currently moving, tons
    pub payload_in_motion_tons: f64,
    pub open_alerts: OpenAlertCounts,
    pub low_pressure_tires: u64,
    pub high_pressure_tires: u64,
}

/// Service for truck queries and mutations
pub struct TruckService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl TruckService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    /// List trucks matching the filter. Returns the requested page slice
    /// and the total match count before paging.
    pub async fn list_trucks(
        &self,
        filter: &TruckListFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Truck>, u64)> {
        let trucks = self.repos.trucks().find_all().await?;

        // Only hit the alerts table when the filter actually needs it
        let with_open_alerts: Option<HashSet<String>> = match filter.has_alerts {
            Some(_) => Some(
                self.repos
                    .alerts()
                    .trucks_with_open_alerts()
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => None,
        };

        let matched: Vec<Truck> = trucks
            .into_iter()
            .filter(|truck| filter_matches(filter, truck, with_open_alerts.as_ref()))
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

    /// Fetch one truck with its tire readings and alerts (newest first).
    pub async fn get_truck(&self, id: &str) -> DomainResult<TruckDetail> {
        let truck = self
            .repos
            .trucks()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Truck", "id", id))?;
        let tires = self.repos.tires().find_by_truck(id).await?;
        let alerts = self.repos.alerts().find_by_truck(id).await?;

        Ok(TruckDetail {
            truck,
            tires,
            alerts,
        })
    }

    /// Register a new truck. Plate numbers are unique across the fleet.
    pub async fn create_truck(&self, new: NewTruck) -> DomainResult<Truck> {
        if self
            .repos
            .trucks()
            .find_by_plate(&new.plate_number)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Truck with plate {} already exists",
                new.plate_number
            )));
        }

        let truck = self.repos.trucks().create(new).await?;
        info!("Truck registered: {} ({})", truck.plate_number, truck.id);
        Ok(truck)
    }

    /// Partial metadata update; untouched fields keep their values.
    pub async fn update_truck(&self, id: &str, update: TruckUpdate) -> DomainResult<Truck> {
        self.repos.trucks().update(id, update).await
    }

    /// Set the operational status and broadcast the change.
    ///
    /// Transitions are free-form: any status may follow any other, and a
    /// successful write always emits `status-changed`.
    pub async fn set_status(&self, id: &str, status: TruckStatus) -> DomainResult<Truck> {
        let before = self
            .repos
            .trucks()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Truck", "id", id))?;

        let truck = self.repos.trucks().update_status(id, status).await?;

        self.event_bus.publish(Event::StatusChanged(StatusChangedEvent {
            truck_id: truck.id.clone(),
            old_status: before.status.to_string(),
            new_status: truck.status.to_string(),
            timestamp: Utc::now(),
        }));

        info!(
            "Truck {} status: {} -> {}",
            truck.plate_number, before.status, truck.status
        );
        Ok(truck)
    }

    /// Delete a truck and everything hanging off it (cleanup flows only).
    pub async fn delete_truck(&self, id: &str) -> DomainResult<()> {
        let deleted = self.repos.trucks().delete(id).await?;
        if !deleted {
            return Err(DomainError::not_found("Truck", "id", id));
        }
        info!("Truck deleted: {}", id);
        Ok(())
    }

    /// All tire readings for a truck, ordered by slot.
    pub async fn tires(&self, truck_id: &str) -> DomainResult<Vec<TireReading>> {
        self.require_truck(truck_id).await?;
        self.repos.tires().find_by_truck(truck_id).await
    }

    /// One tire reading addressed by mounting slot (1-6).
    pub async fn tire_detail(&self, truck_id: &str, slot: u32) -> DomainResult<TireReading> {
        if !(1..=SLOT_COUNT).contains(&slot) {
            return Err(DomainError::Validation(format!(
                "Tire slot must be between 1 and {}, got {}",
                SLOT_COUNT, slot
            )));
        }
        self.require_truck(truck_id).await?;
        self.repos
            .tires()
            .find_by_truck_and_slot(truck_id, slot)
            .await?
            .ok_or_else(|| DomainError::not_found("Tire reading", "slot", slot.to_string()))
    }

    /// Write one tire reading. Pressure is clamped and status derived by
    /// the store layer, keeping reading state consistent by construction.
    pub async fn record_tire_reading(
        &self,
        truck_id: &str,
        slot: u32,
        pressure_psi: f64,
        temperature_c: f64,
    ) -> DomainResult<TireReading> {
        if !(1..=SLOT_COUNT).contains(&slot) {
            return Err(DomainError::Validation(format!(
                "Tire slot must be between 1 and {}, got {}",
                SLOT_COUNT, slot
            )));
        }
        self.require_truck(truck_id).await?;
        self.repos
            .tires()
            .upsert(truck_id, slot, pressure_psi, temperature_c)
            .await
    }

    /// Recent location samples for a truck, newest first.
    pub async fn history(&self, truck_id: &str, limit: u64) -> DomainResult<Vec<LocationSample>> {
        self.require_truck(truck_id).await?;
        self.repos.locations().find_recent(truck_id, limit).await
    }

    /// Aggregate the numbers shown on the dashboard landing page.
    pub async fn dashboard_stats(&self) -> DomainResult<DashboardStats> {
        let trucks = self.repos.trucks().find_all().await?;
        let alerts = self.repos.alerts().find_all().await?;

        let total_trucks = trucks.len() as u64;
        let mut active = 0u64;
        let mut inactive = 0u64;
        let mut maintenance = 0u64;
        let mut with_position = 0u64;
        let mut fuel_sum = 0.0f64;
        let mut payload_in_motion = 0.0f64;

        for truck in &trucks {
            match truck.status {
                TruckStatus::Active => active += 1,
                TruckStatus::Inactive => inactive += 1,
                TruckStatus::Maintenance => maintenance += 1,
            }
            if truck.has_position() {
                with_position += 1;
            }
            fuel_sum += truck.fuel_level;
            if truck.status == TruckStatus::Active && truck.speed_kmh > 0.0 {
                payload_in_motion += truck.payload_tons;
            }
        }

        let mut open_alerts = OpenAlertCounts::default();
        for alert in alerts.iter().filter(|a| !a.resolved) {
            match alert.severity {
                AlertSeverity::Low => open_alerts.low += 1,
                AlertSeverity::Medium => open_alerts.medium += 1,
                AlertSeverity::High => open_alerts.high += 1,
                AlertSeverity::Critical => open_alerts.critical += 1,
            }
        }

        let average_fuel_level = if trucks.is_empty() {
            0.0
        } else {
            fuel_sum / trucks.len() as f64
        };

        Ok(DashboardStats {
            total_trucks,
            active_trucks: active,
            inactive_trucks: inactive,
            maintenance_trucks: maintenance,
            trucks_with_position: with_position,
            average_fuel_level,
            payload_in_motion_tons: payload_in_motion,
            open_alerts,
            low_pressure_tires: self.repos.tires().count_by_status(TireStatus::Low).await?,
            high_pressure_tires: self.repos.tires().count_by_status(TireStatus::High).await?,
        })
    }

    async fn require_truck(&self, id: &str) -> DomainResult<()> {
        match self.repos.trucks().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Truck", "id", id)),
        }
    }
}

fn filter_matches(
    filter: &TruckListFilter,
    truck: &Truck,
    with_open_alerts: Option<&HashSet<String>>,
) -> bool {
    if let Some(status) = filter.status {
        if truck.status != status {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        if !truck.plate_number.to_lowercase().contains(&needle) {
            return false;
        }
    }
    if let Some(min) = filter.fuel_min {
        if truck.fuel_level < min {
            return false;
        }
    }
    if let Some(max) = filter.fuel_max {
        if truck.fuel_level > max {
            return false;
        }
    }
    if let (Some(wanted), Some(open)) = (filter.has_alerts, with_open_alerts) {
        if open.contains(&truck.id) != wanted {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::truck::Position;

    fn truck(id: &str, plate: &str, status: TruckStatus, fuel: f64) -> Truck {
        let now = Utc::now();
        Truck {
            id: id.to_string(),
            plate_number: plate.to_string(),
            model_id: None,
            fleet_group_id: None,
            driver_id: None,
            status,
            position: Some(Position::new(41.48, 64.58)),
            heading: 0.0,
            speed_kmh: 0.0,
            fuel_level: fuel,
            payload_tons: 90.0,
            odometer_km: 0.0,
            engine_hours: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn filter_matches_status_and_fuel_range() {
        let filter = TruckListFilter {
            status: Some(TruckStatus::Active),
            fuel_min: Some(20.0),
            fuel_max: Some(80.0),
            ..TruckListFilter::default()
        };

        assert!(filter_matches(
            &filter,
            &truck("t-1", "01 100 AAA", TruckStatus::Active, 50.0),
            None
        ));
        assert!(!filter_matches(
            &filter,
            &truck("t-2", "01 101 AAA", TruckStatus::Maintenance, 50.0),
            None
        ));
        assert!(!filter_matches(
            &filter,
            &truck("t-3", "01 102 AAA", TruckStatus::Active, 10.0),
            None
        ));
    }

    #[test]
    fn filter_search_is_case_insensitive_substring() {
        let filter = TruckListFilter {
            search: Some("777 aa".to_string()),
            ..TruckListFilter::default()
        };

        assert!(filter_matches(
            &filter,
            &truck("t-1", "01 777 AAA", TruckStatus::Active, 50.0),
            None
        ));
        assert!(!filter_matches(
            &filter,
            &truck("t-2", "01 778 AAA", TruckStatus::Active, 50.0),
            None
        ));
    }

    #[test]
    fn filter_has_alerts_checks_open_alert_set() {
        let open: HashSet<String> = ["t-1".to_string()].into_iter().collect();

        let wants_alerts = TruckListFilter {
            has_alerts: Some(true),
            ..TruckListFilter::default()
        };
        assert!(filter_matches(
            &wants_alerts,
            &truck("t-1", "01 100 AAA", TruckStatus::Active, 50.0),
            Some(&open)
        ));
        assert!(!filter_matches(
            &wants_alerts,
            &truck("t-2", "01 101 AAA", TruckStatus::Active, 50.0),
            Some(&open)
        ));

        let wants_quiet = TruckListFilter {
            has_alerts: Some(false),
            ..TruckListFilter::default()
        };
        assert!(!filter_matches(
            &wants_quiet,
            &truck("t-1", "01 100 AAA", TruckStatus::Active, 50.0),
            Some(&open)
        ));
    }

    #[test]
    fn open_alert_counts_total_sums_severities() {
        let counts = OpenAlertCounts {
            low: 1,
            medium: 2,
            high: 3,
            critical: 4,
        };
        assert_eq!(counts.total(), 10);
    }
}
