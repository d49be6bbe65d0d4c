//! Dashboard DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::services::DashboardStats;

/// Unresolved alert counts broken down by severity
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpenAlertCountsDto {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
    pub total: u64,
}

/// Aggregate numbers for the dashboard landing page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsDto {
    pub total_trucks: u64,
    pub active_trucks: u64,
    pub inactive_trucks: u64,
    pub maintenance_trucks: u64,
    pub trucks_with_position: u64,
    pub average_fuel_level: f64,
    /// Combined rated payload of active trucks currently moving, tons
    pub payload_in_motion_tons: f64,
    pub open_alerts: OpenAlertCountsDto,
    pub low_pressure_tires: u64,
    pub high_pressure_tires: u64,
}

impl DashboardStatsDto {
    pub fn from_domain(stats: DashboardStats) -> Self {
        Self {
            total_trucks: stats.total_trucks,
            active_trucks: stats.active_trucks,
            inactive_trucks: stats.inactive_trucks,
            maintenance_trucks: stats.maintenance_trucks,
            trucks_with_position: stats.trucks_with_position,
            average_fuel_level: stats.average_fuel_level,
            payload_in_motion_tons: stats.payload_in_motion_tons,
            open_alerts: OpenAlertCountsDto {
                total: stats.open_alerts.total(),
                low: stats.open_alerts.low,
                medium: stats.open_alerts.medium,
                high: stats.open_alerts.high,
                critical: stats.open_alerts.critical,
            },
            low_pressure_tires: stats.low_pressure_tires,
            high_pressure_tires: stats.high_pressure_tires,
        }
    }
}
