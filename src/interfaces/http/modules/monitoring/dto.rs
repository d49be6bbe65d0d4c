//! Monitoring DTOs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::services::SimulatorStats;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulatorStatsDto {
    pub running: bool,
    pub tick_interval_secs: u64,
    pub ticks_completed: u64,
    /// Ticks dropped because the previous one was still in flight
    pub ticks_skipped: u64,
    pub tick_failures: u64,
    pub trucks_updated_total: u64,
    pub last_tick_at: Option<String>,
    pub last_updated_count: Option<usize>,
}

impl SimulatorStatsDto {
    pub fn from_stats(stats: SimulatorStats) -> Self {
        Self {
            running: stats.running,
            tick_interval_secs: stats.tick_interval_secs,
            ticks_completed: stats.ticks_completed,
            ticks_skipped: stats.ticks_skipped,
            tick_failures: stats.tick_failures,
            trucks_updated_total: stats.trucks_updated_total,
            last_tick_at: stats.last_tick_at.map(|dt| dt.to_rfc3339()),
            last_updated_count: stats.last_updated_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayStatsDto {
    /// Open WebSocket connections
    pub connected_clients: usize,
    /// Subscription count per channel name
    pub subscriptions: HashMap<String, usize>,
    /// Receivers currently attached to the broadcast bus
    pub bus_subscribers: usize,
}
