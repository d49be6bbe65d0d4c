//! Position simulator service
//!
//! Drives the synthetic telemetry feed: on a fixed interval it picks a
//! random batch of active trucks, moves each one a small step inside the
//! concession bounds, burns a little fuel, occasionally disturbs tire
//! pressures, and broadcasts a tick-completed event when the batch is done.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::RwLock;

use crate::application::events::SharedEventBus;
use crate::domain::events::{Event, TickCompletedEvent};
use crate::domain::geo::{jitter, normalize_heading, GeoBounds};
use crate::domain::location::NewLocationSample;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::truck::{Position, TelemetryUpdate, Truck};
use crate::domain::DomainResult;
use crate::shared::shutdown::ShutdownSignal;

/// Configuration for the position simulator
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// How often to run a tick (seconds)
    pub tick_interval_secs: u64,
    /// Smallest batch of trucks to move per tick
    pub min_trucks_per_tick: usize,
    /// Largest batch of trucks to move per tick
    pub max_trucks_per_tick: usize,
    /// Max absolute change per axis per tick (degrees)
    pub position_jitter_deg: f64,
    /// Upper bound for the fresh speed draw (km/h)
    pub max_speed_kmh: f64,
    /// Max absolute heading change per tick (degrees)
    pub heading_jitter_deg: f64,
    /// Max fuel burned per tick (percentage points)
    pub max_fuel_burn_pct: f64,
    /// Chance that a selected truck also gets a tire pressure shift
    pub tire_event_probability: f64,
    /// Max absolute tire pressure shift (psi)
    pub tire_jitter_psi: f64,
    /// Area the trucks are confined to
    pub bounds: GeoBounds,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 5,
            min_trucks_per_tick: 10,
            max_trucks_per_tick: 60,
            position_jitter_deg: 0.0005,
            max_speed_kmh: 60.0,
            heading_jitter_deg: 15.0,
            max_fuel_burn_pct: 0.5,
            tire_event_probability: 0.10,
            tire_jitter_psi: 2.0,
            bounds: GeoBounds::default(),
        }
    }
}

#[derive(Debug, Default)]
struct SimulatorCounters {
    ticks_completed: AtomicU64,
    ticks_skipped: AtomicU64,
    tick_failures: AtomicU64,
    trucks_updated: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
struct LastTick {
    at: DateTime<Utc>,
    updated: usize,
}

/// Snapshot of simulator activity for the monitoring endpoint
#[derive(Debug, Clone)]
pub struct SimulatorStats {
    pub running: bool,
    pub tick_interval_secs: u64,
    pub ticks_completed: u64,
    pub ticks_skipped: u64,
    pub tick_failures: u64,
    pub trucks_updated_total: u64,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub last_updated_count: Option<usize>,
}

/// Background service that advances truck telemetry on a fixed interval
pub struct PositionSimulator {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
    config: SimulatorConfig,
    running: Arc<RwLock<bool>>,
    tick_in_progress: Arc<AtomicBool>,
    counters: Arc<SimulatorCounters>,
    last_tick: Arc<RwLock<Option<LastTick>>>,
}

impl PositionSimulator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self::with_config(repos, event_bus, SimulatorConfig::default())
    }

    pub fn with_config(
        repos: Arc<dyn RepositoryProvider>,
        event_bus: SharedEventBus,
        config: SimulatorConfig,
    ) -> Self {
        Self {
            repos,
            event_bus,
            config,
            running: Arc::new(RwLock::new(false)),
            tick_in_progress: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(SimulatorCounters::default()),
            last_tick: Arc::new(RwLock::new(None)),
        }
    }

    /// Start the simulation loop in a background task.
    ///
    /// The interval keeps firing on schedule regardless of how long a tick
    /// takes. A firing that finds the previous tick still in flight is
    /// counted as skipped instead of running concurrently against the store.
    pub fn start(&self, shutdown: ShutdownSignal) -> tokio::task::JoinHandle<()> {
        let repos = self.repos.clone();
        let event_bus = self.event_bus.clone();
        let config = self.config.clone();
        let running = self.running.clone();
        let tick_in_progress = self.tick_in_progress.clone();
        let counters = self.counters.clone();
        let last_tick = self.last_tick.clone();

        tokio::spawn(async move {
            {
                let mut state = running.write().await;
                *state = true;
            }

            info!(
                "🛰️ Position simulator started (tick: {}s, batch: {}..={} trucks)",
                config.tick_interval_secs, config.min_trucks_per_tick, config.max_trucks_per_tick
            );

            let mut interval =
                tokio::time::interval(Duration::from_secs(config.tick_interval_secs));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        // Ticks must never overlap: a slow store gets a
                        // skipped-tick counter instead of concurrent updates.
                        if tick_in_progress.swap(true, Ordering::SeqCst) {
                            counters.ticks_skipped.fetch_add(1, Ordering::Relaxed);
                            metrics::counter!("fleet_sim_ticks_skipped_total").increment(1);
                            warn!("Previous simulation tick still in flight, skipping this one");
                            continue;
                        }

                        let repos = repos.clone();
                        let event_bus = event_bus.clone();
                        let config = config.clone();
                        let counters = counters.clone();
                        let last_tick = last_tick.clone();
                        let tick_in_progress = tick_in_progress.clone();

                        tokio::spawn(async move {
                            let started = Instant::now();
                            match run_tick(repos.as_ref(), &event_bus, &config).await {
                                Ok(updated) => {
                                    counters.ticks_completed.fetch_add(1, Ordering::Relaxed);
                                    counters
                                        .trucks_updated
                                        .fetch_add(updated as u64, Ordering::Relaxed);
                                    metrics::counter!("fleet_sim_ticks_total").increment(1);
                                    metrics::counter!("fleet_sim_trucks_updated_total")
                                        .increment(updated as u64);
                                    let mut last = last_tick.write().await;
                                    *last = Some(LastTick {
                                        at: Utc::now(),
                                        updated,
                                    });
                                }
                                Err(e) => {
                                    counters.tick_failures.fetch_add(1, Ordering::Relaxed);
                                    metrics::counter!("fleet_sim_tick_failures_total").increment(1);
                                    warn!("Simulation tick aborted: {}", e);
                                }
                            }
                            metrics::histogram!("fleet_sim_tick_duration_seconds")
                                .record(started.elapsed().as_secs_f64());
                            tick_in_progress.store(false, Ordering::SeqCst);
                        });
                    }
                    _ = shutdown.notified().wait() => {
                        info!("🛰️ Position simulator shutting down");
                        break;
                    }
                }
            }

            let mut state = running.write().await;
            *state = false;
        })
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    pub async fn stats(&self) -> SimulatorStats {
        let last = *self.last_tick.read().await;
        SimulatorStats {
            running: self.is_running().await,
            tick_interval_secs: self.config.tick_interval_secs,
            ticks_completed: self.counters.ticks_completed.load(Ordering::Relaxed),
            ticks_skipped: self.counters.ticks_skipped.load(Ordering::Relaxed),
            tick_failures: self.counters.tick_failures.load(Ordering::Relaxed),
            trucks_updated_total: self.counters.trucks_updated.load(Ordering::Relaxed),
            last_tick_at: last.map(|t| t.at),
            last_updated_count: last.map(|t| t.updated),
        }
    }
}

/// Everything a tick decided for one truck, computed before any I/O.
struct TruckPlan {
    truck_id: String,
    plate_number: String,
    telemetry: TelemetryUpdate,
    tire_delta_psi: Option<f64>,
}

/// Run one simulation tick. Returns how many trucks were actually updated.
///
/// Failing to load the candidate list aborts the whole tick; a failure on
/// one truck is logged and the rest of the batch still runs. The completion
/// event is published either way once the batch is done.
async fn run_tick(
    repos: &dyn RepositoryProvider,
    event_bus: &SharedEventBus,
    config: &SimulatorConfig,
) -> DomainResult<usize> {
    let candidates = repos.trucks().find_simulation_candidates().await?;

    // All randomness happens up front so the rng never crosses an await.
    let plans = {
        let mut rng = rand::thread_rng();
        plan_tick(&candidates, config, &mut rng)
    };

    debug!(
        "Simulation tick: {} candidates, {} selected",
        candidates.len(),
        plans.len()
    );

    let mut updated = 0usize;
    for plan in &plans {
        match apply_plan(repos, plan).await {
            Ok(()) => updated += 1,
            Err(e) => {
                warn!(
                    "Failed to update truck {} ({}): {}",
                    plan.plate_number, plan.truck_id, e
                );
            }
        }
    }

    event_bus.publish(Event::TickCompleted(TickCompletedEvent {
        timestamp: Utc::now(),
        updated_count: updated,
    }));

    Ok(updated)
}

/// Pick this tick's batch and decide every change before touching the store.
fn plan_tick<R: Rng + ?Sized>(
    candidates: &[Truck],
    config: &SimulatorConfig,
    rng: &mut R,
) -> Vec<TruckPlan> {
    let selected = choose_candidates(candidates, config, rng);

    let mut plans = Vec::with_capacity(selected.len());
    for truck in selected {
        let telemetry = match advance_truck(truck, config, rng) {
            Some(telemetry) => telemetry,
            None => continue,
        };
        let tire_delta_psi = if rng.gen_bool(config.tire_event_probability) {
            // One shared delta for the whole axle set of this truck
            Some(rng.gen_range(-config.tire_jitter_psi..=config.tire_jitter_psi))
        } else {
            None
        };
        plans.push(TruckPlan {
            truck_id: truck.id.clone(),
            plate_number: truck.plate_number.clone(),
            telemetry,
            tire_delta_psi,
        });
    }
    plans
}

/// Pick a random batch of `min..=max` trucks, capped by how many exist.
fn choose_candidates<'a, R: Rng + ?Sized>(
    candidates: &'a [Truck],
    config: &SimulatorConfig,
    rng: &mut R,
) -> Vec<&'a Truck> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let batch = rng
        .gen_range(config.min_trucks_per_tick..=config.max_trucks_per_tick)
        .min(candidates.len());
    candidates.choose_multiple(rng, batch).collect()
}

/// Compute one truck's next telemetry. Returns `None` for trucks without a
/// known position, which the candidate query already excludes.
fn advance_truck<R: Rng + ?Sized>(
    truck: &Truck,
    config: &SimulatorConfig,
    rng: &mut R,
) -> Option<TelemetryUpdate> {
    let current = truck.position?;

    let next_lat = jitter(rng, current.latitude, config.position_jitter_deg);
    let next_lng = jitter(rng, current.longitude, config.position_jitter_deg);
    let (lat, lng) = config.bounds.clamp(next_lat, next_lng);
    let position = Position::new(lat, lng);

    let speed_kmh = rng.gen_range(0.0..=config.max_speed_kmh);
    let heading = normalize_heading(jitter(rng, truck.heading, config.heading_jitter_deg));
    // Fuel only ever goes down, and never below empty
    let fuel_level = (truck.fuel_level - rng.gen_range(0.0..=config.max_fuel_burn_pct)).max(0.0);

    Some(TelemetryUpdate {
        position,
        speed_kmh,
        heading,
        fuel_level,
    })
}

/// Persist one planned update: the atomic truck row update, the history
/// sample, and (sometimes) the tire pressure shift.
async fn apply_plan(repos: &dyn RepositoryProvider, plan: &TruckPlan) -> DomainResult<()> {
    repos
        .trucks()
        .apply_telemetry(&plan.truck_id, plan.telemetry)
        .await?;

    let sample = NewLocationSample::from_telemetry(&plan.truck_id, &plan.telemetry, Utc::now());
    repos.locations().append(sample).await?;

    if let Some(delta_psi) = plan.tire_delta_psi {
        let shifted = repos.tires().shift_all_pressures(&plan.truck_id, delta_psi).await?;
        debug!(
            "Shifted {} tire readings on truck {} by {:+.2} psi",
            shifted, plan.truck_id, delta_psi
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::truck::TruckStatus;

    fn test_truck(id: &str, lat: f64, lng: f64, fuel: f64) -> Truck {
        let now = Utc::now();
        Truck {
            id: id.to_string(),
            plate_number: format!("01 {} AAA", id),
            model_id: None,
            fleet_group_id: None,
            driver_id: None,
            status: TruckStatus::Active,
            position: Some(Position::new(lat, lng)),
            heading: 90.0,
            speed_kmh: 30.0,
            fuel_level: fuel,
            payload_tons: 90.0,
            odometer_km: 12_500.0,
            engine_hours: 800.0,
            created_at: now,
            updated_at: now,
        }
    }

    fn angular_distance(a: f64, b: f64) -> f64 {
        let diff = (a - b).rem_euclid(360.0);
        diff.min(360.0 - diff)
    }

    #[test]
    fn advance_keeps_every_value_in_range() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let (lat, lng) = config.bounds.center();
        let mut truck = test_truck("t-1", lat, lng, 88.0);

        for _ in 0..500 {
            let telemetry = advance_truck(&truck, &config, &mut rng).unwrap();
            assert!(config
                .bounds
                .contains(telemetry.position.latitude, telemetry.position.longitude));
            assert!(telemetry.speed_kmh >= 0.0 && telemetry.speed_kmh <= config.max_speed_kmh);
            assert!(telemetry.heading >= 0.0 && telemetry.heading < 360.0);
            assert!(telemetry.fuel_level >= 0.0);
            assert!(telemetry.fuel_level <= truck.fuel_level);
            assert!(angular_distance(telemetry.heading, truck.heading) <= config.heading_jitter_deg + 1e-9);

            truck.position = Some(telemetry.position);
            truck.heading = telemetry.heading;
            truck.fuel_level = telemetry.fuel_level;
        }
    }

    #[test]
    fn advance_clamps_at_the_concession_edge() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let corner = test_truck(
            "t-corner",
            config.bounds.max_lat,
            config.bounds.max_lng,
            70.0,
        );

        let mut pinned = 0;
        for _ in 0..300 {
            let telemetry = advance_truck(&corner, &config, &mut rng).unwrap();
            assert!(config
                .bounds
                .contains(telemetry.position.latitude, telemetry.position.longitude));
            if telemetry.position.latitude == config.bounds.max_lat {
                pinned += 1;
            }
        }
        // Roughly half of the draws push past the edge and get pinned to it
        assert!(pinned > 0);
    }

    #[test]
    fn fuel_never_increases_and_floors_at_zero() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let (lat, lng) = config.bounds.center();
        let mut truck = test_truck("t-fuel", lat, lng, 0.3);

        for _ in 0..10 {
            let telemetry = advance_truck(&truck, &config, &mut rng).unwrap();
            assert!(telemetry.fuel_level <= truck.fuel_level);
            assert!(telemetry.fuel_level >= 0.0);
            truck.fuel_level = telemetry.fuel_level;
            truck.position = Some(telemetry.position);
        }
        assert_eq!(truck.fuel_level, 0.0);
    }

    #[test]
    fn advance_skips_trucks_without_a_position() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut truck = test_truck("t-null", 41.48, 64.58, 50.0);
        truck.position = None;

        assert!(advance_truck(&truck, &config, &mut rng).is_none());
    }

    #[test]
    fn selection_stays_within_batch_bounds_and_never_repeats() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let fleet: Vec<Truck> = (0..100)
            .map(|i| test_truck(&format!("t-{i}"), 41.48, 64.58, 90.0))
            .collect();

        for _ in 0..50 {
            let selected = choose_candidates(&fleet, &config, &mut rng);
            assert!(selected.len() >= config.min_trucks_per_tick);
            assert!(selected.len() <= config.max_trucks_per_tick);

            let mut ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), selected.len());
        }
    }

    #[test]
    fn selection_is_capped_by_fleet_size() {
        let config = SimulatorConfig::default();
        let mut rng = StdRng::seed_from_u64(19);

        let small: Vec<Truck> = (0..5)
            .map(|i| test_truck(&format!("t-{i}"), 41.48, 64.58, 90.0))
            .collect();
        assert_eq!(choose_candidates(&small, &config, &mut rng).len(), 5);

        let empty: Vec<Truck> = Vec::new();
        assert!(choose_candidates(&empty, &config, &mut rng).is_empty());
    }

    #[test]
    fn tire_shift_uses_one_delta_per_truck() {
        let always = SimulatorConfig {
            tire_event_probability: 1.0,
            ..SimulatorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(23);
        let fleet: Vec<Truck> = (0..30)
            .map(|i| test_truck(&format!("t-{i}"), 41.48, 64.58, 90.0))
            .collect();

        let plans = plan_tick(&fleet, &always, &mut rng);
        assert!(!plans.is_empty());
        for plan in &plans {
            let delta = plan.tire_delta_psi.unwrap();
            assert!(delta.abs() <= always.tire_jitter_psi);
        }

        let never = SimulatorConfig {
            tire_event_probability: 0.0,
            ..SimulatorConfig::default()
        };
        let plans = plan_tick(&fleet, &never, &mut rng);
        assert!(plans.iter().all(|p| p.tire_delta_psi.is_none()));
    }
}
