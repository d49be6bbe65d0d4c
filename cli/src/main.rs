//! Texnouz Fleet Telemetry — data management CLI
//!
//! One tool for the jobs that used to be a pile of one-off scripts:
//! seeding synthetic fleet data, backfilling location history, exporting
//! snapshots and retention cleanup. Shares the concession bounds and
//! coordinate generation with the server so seeded trucks start where
//! the simulator expects them.
//!
//! ```sh
//! # Seed reference data + 120 trucks with tires and a few alerts
//! fleet-data seed --trucks 120
//!
//! # Backfill 7 days of location history at 5-minute resolution
//! fleet-data history --days 7 --interval-mins 5
//!
//! # Export the truck snapshot
//! fleet-data export --format csv --output trucks.csv
//!
//! # Drop samples and resolved alerts older than 30 days
//! fleet-data cleanup --older-than-days 30
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rand::seq::SliceRandom;
use rand::Rng;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use texnouz_fleet::domain::alert::NewAlert;
use texnouz_fleet::domain::fleet::{NewDriver, NewFleetGroup, NewTruckModel};
use texnouz_fleet::domain::geo::normalize_heading;
use texnouz_fleet::domain::location::NewLocationSample;
use texnouz_fleet::domain::truck::TruckStatus;
use texnouz_fleet::domain::{AlertSeverity, GeoBounds, NewTruck, Position, RepositoryProvider};
use texnouz_fleet::infrastructure::database::migrator::Migrator;
use texnouz_fleet::{default_config_path, AppConfig, DatabaseConfig, SeaOrmRepositoryProvider};

/// Texnouz Fleet Telemetry — synthetic data management tool.
#[derive(Parser, Debug)]
#[command(
    name = "fleet-data",
    version,
    about = "Seed, backfill, export and prune fleet telemetry data",
    long_about = "Data management companion for the fleet telemetry server.\n\n\
                  Operates on the same database and uses the same concession\n\
                  bounds as the position simulator.\n\n\
                  Default config: ~/.config/fleet-telemetry/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "FLEET_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database URL from the config file.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed reference data and a synthetic truck fleet.
    Seed {
        /// Number of trucks to create.
        #[arg(long, default_value_t = 120)]
        trucks: usize,
        /// Fraction of trucks created as active (the rest split between
        /// inactive and maintenance).
        #[arg(long, default_value_t = 0.7)]
        active_ratio: f64,
        /// Also create a handful of unresolved alerts on random trucks.
        #[arg(long, default_value_t = true)]
        with_alerts: bool,
    },
    /// Backfill location history for existing trucks.
    History {
        /// How many days back to generate samples for.
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Minutes between consecutive samples.
        #[arg(long, default_value_t = 5)]
        interval_mins: u32,
        /// Restrict to a single truck id (default: every truck with a position).
        #[arg(long)]
        truck: Option<String>,
    },
    /// Export the current truck snapshot to a file.
    Export {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Retention cleanup: prune old location samples and resolved alerts.
    Cleanup {
        /// Delete rows older than this many days.
        #[arg(long, default_value_t = 30)]
        older_than_days: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path).unwrap_or_default();
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    // The CLI may run before the server has ever started, so it always
    // migrates.
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        connect_timeout_secs: config.database.connect_timeout_secs,
    };
    let db = texnouz_fleet::init_database(&db_config).await?;
    Migrator::up(&db, None).await?;

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    match cli.command {
        Command::Seed {
            trucks,
            active_ratio,
            with_alerts,
        } => seed(repos.as_ref(), trucks, active_ratio, with_alerts).await?,
        Command::History {
            days,
            interval_mins,
            truck,
        } => history(repos.as_ref(), days, interval_mins, truck).await?,
        Command::Export { format, output } => export(repos.as_ref(), format, &output).await?,
        Command::Cleanup { older_than_days } => cleanup(repos.as_ref(), older_than_days).await?,
    }

    db.close().await?;
    Ok(())
}

// ── seed ───────────────────────────────────────────────────────────

const MANUFACTURERS: &[(&str, &str, f64)] = &[
    ("BelAZ", "75131", 130.0),
    ("BelAZ", "75306", 220.0),
    ("Caterpillar", "777G", 90.7),
    ("Caterpillar", "785D", 139.0),
    ("Komatsu", "HD785-8", 91.0),
];

const GROUPS: &[(&str, &str)] = &[
    ("North Pit", "Haul fleet for the northern benches"),
    ("South Pit", "Haul fleet for the southern extension"),
    ("Stockpile", "Shuttle trucks between crusher and stockpile"),
];

const DRIVER_NAMES: &[&str] = &[
    "Alisher Rakhimov",
    "Bobur Yusupov",
    "Dilshod Karimov",
    "Jasur Tashkentov",
    "Otabek Nazarov",
    "Rustam Saidov",
    "Sherzod Umarov",
    "Timur Abdullaev",
];

async fn seed(
    repos: &dyn RepositoryProvider,
    truck_count: usize,
    active_ratio: f64,
    with_alerts: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let bounds = GeoBounds::default();

    // Reference data first: groups, models, drivers
    let mut group_ids = Vec::new();
    for (name, description) in GROUPS {
        let group = match repos.fleet().find_group_by_name(name).await? {
            Some(existing) => existing,
            None => {
                repos
                    .fleet()
                    .create_group(NewFleetGroup {
                        name: name.to_string(),
                        description: Some(description.to_string()),
                    })
                    .await?
            }
        };
        group_ids.push(group.id);
    }

    let existing_models = repos.fleet().list_models().await?;
    let mut model_ids: Vec<String> = existing_models.iter().map(|m| m.id.clone()).collect();
    if model_ids.is_empty() {
        for (manufacturer, name, capacity_tons) in MANUFACTURERS {
            let model = repos
                .fleet()
                .create_model(NewTruckModel {
                    manufacturer: manufacturer.to_string(),
                    name: name.to_string(),
                    capacity_tons: *capacity_tons,
                })
                .await?;
            model_ids.push(model.id);
        }
    }

    let existing_drivers = repos.fleet().list_drivers().await?;
    let mut driver_ids: Vec<String> = existing_drivers.iter().map(|d| d.id.clone()).collect();
    if driver_ids.is_empty() {
        for name in DRIVER_NAMES {
            let shift = if rng.gen_bool(0.5) { "day" } else { "night" };
            let driver = repos
                .fleet()
                .create_driver(NewDriver {
                    full_name: name.to_string(),
                    license_class: "CE".to_string(),
                    shift: Some(shift.to_string()),
                })
                .await?;
            driver_ids.push(driver.id);
        }
    }

    info!(
        "Reference data ready: {} groups, {} models, {} drivers",
        group_ids.len(),
        model_ids.len(),
        driver_ids.len()
    );

    // Trucks, each with 6 tire readings
    let mut created = 0usize;
    let mut truck_ids = Vec::new();
    for i in 0..truck_count {
        let status = if rng.gen_bool(active_ratio.clamp(0.0, 1.0)) {
            TruckStatus::Active
        } else if rng.gen_bool(0.5) {
            TruckStatus::Inactive
        } else {
            TruckStatus::Maintenance
        };

        let (lat, lng) = bounds.random_point(&mut rng);
        let plate = format!(
            "01 {:03} {}{}{}",
            rng.gen_range(100..1000),
            rng.gen_range(b'A'..=b'Z') as char,
            rng.gen_range(b'A'..=b'Z') as char,
            rng.gen_range(b'A'..=b'Z') as char,
        );

        let truck = match repos
            .trucks()
            .create(NewTruck {
                plate_number: plate.clone(),
                model_id: model_ids.choose(&mut rng).cloned(),
                fleet_group_id: group_ids.choose(&mut rng).cloned(),
                driver_id: if rng.gen_bool(0.8) {
                    driver_ids.choose(&mut rng).cloned()
                } else {
                    None
                },
                status: Some(status),
                position: Some(Position::new(lat, lng)),
                fuel_level: Some(rng.gen_range(20.0..100.0)),
                payload_tons: Some(rng.gen_range(0.0..130.0)),
                odometer_km: Some(rng.gen_range(10_000.0..400_000.0)),
                engine_hours: Some(rng.gen_range(1_000.0..30_000.0)),
            })
            .await
        {
            Ok(truck) => truck,
            Err(e) => {
                // Plate collisions happen when re-seeding, not fatal
                warn!("Skipping truck {}: {}", plate, e);
                continue;
            }
        };

        for slot in 1..=6u32 {
            repos
                .tires()
                .upsert(
                    &truck.id,
                    slot,
                    rng.gen_range(85.0..115.0),
                    rng.gen_range(35.0..75.0),
                )
                .await?;
        }

        truck_ids.push(truck.id);
        created += 1;
        if (i + 1) % 50 == 0 {
            info!("Seeded {}/{} trucks...", i + 1, truck_count);
        }
    }

    if with_alerts && !truck_ids.is_empty() {
        let kinds = [
            ("low_fuel", AlertSeverity::Medium, "Fuel level below 15%"),
            ("tire_pressure", AlertSeverity::High, "Tire pressure out of range"),
            ("engine_temp", AlertSeverity::Critical, "Engine temperature high"),
            ("maintenance_due", AlertSeverity::Low, "Scheduled maintenance due"),
        ];
        let alert_count = (created / 10).max(1);
        for _ in 0..alert_count {
            let truck_id = truck_ids.choose(&mut rng).cloned().unwrap_or_default();
            let (kind, severity, message) = kinds[rng.gen_range(0..kinds.len())];
            repos
                .alerts()
                .create(NewAlert {
                    truck_id,
                    kind: kind.to_string(),
                    severity,
                    message: message.to_string(),
                })
                .await?;
        }
        info!("Created {} alerts", alert_count);
    }

    info!("✅ Seeded {} trucks (requested {})", created, truck_count);
    Ok(())
}

// ── history ────────────────────────────────────────────────────────

async fn history(
    repos: &dyn RepositoryProvider,
    days: u32,
    interval_mins: u32,
    truck: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let bounds = GeoBounds::default();

    let trucks = match truck {
        Some(id) => match repos.trucks().find_by_id(&id).await? {
            Some(t) => vec![t],
            None => {
                warn!("Truck {} not found", id);
                return Ok(());
            }
        },
        None => repos.trucks().find_all().await?,
    };

    let interval = ChronoDuration::minutes(i64::from(interval_mins.max(1)));
    let start = Utc::now() - ChronoDuration::days(i64::from(days));
    let mut written = 0u64;

    for t in &trucks {
        // Trucks without a position have never been on the map
        let Some(pos) = t.position else { continue };

        let (mut lat, mut lng) = (pos.latitude, pos.longitude);
        let mut heading = t.heading;
        let mut fuel = t.fuel_level;
        let mut at = start;

        while at < Utc::now() {
            lat = bounds.clamp_lat(lat + rng.gen_range(-0.002..=0.002));
            lng = bounds.clamp_lng(lng + rng.gen_range(-0.002..=0.002));
            heading = normalize_heading(heading + rng.gen_range(-30.0..=30.0));
            fuel = (fuel - rng.gen_range(0.0..=2.0)).max(0.0);
            if fuel < 5.0 {
                // Refuelled between shifts
                fuel = rng.gen_range(80.0..100.0);
            }

            repos
                .locations()
                .append(NewLocationSample {
                    truck_id: t.id.clone(),
                    latitude: lat,
                    longitude: lng,
                    speed_kmh: rng.gen_range(0.0..=60.0),
                    heading,
                    fuel_level: fuel,
                    recorded_at: at,
                })
                .await?;

            written += 1;
            at += interval;
        }
    }

    info!(
        "✅ Backfilled {} location samples for {} trucks over {} days",
        written,
        trucks.len(),
        days
    );
    Ok(())
}

// ── export ─────────────────────────────────────────────────────────

async fn export(
    repos: &dyn RepositoryProvider,
    format: ExportFormat,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let trucks = repos.trucks().find_all().await?;

    let contents = match format {
        ExportFormat::Json => {
            let rows: Vec<serde_json::Value> = trucks
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "plate_number": t.plate_number,
                        "status": t.status.to_string(),
                        "latitude": t.position.map(|p| p.latitude),
                        "longitude": t.position.map(|p| p.longitude),
                        "heading": t.heading,
                        "speed_kmh": t.speed_kmh,
                        "fuel_level": t.fuel_level,
                        "payload_tons": t.payload_tons,
                        "odometer_km": t.odometer_km,
                        "engine_hours": t.engine_hours,
                        "updated_at": t.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&rows)?
        }
        ExportFormat::Csv => {
            let mut out = String::from(
                "id,plate_number,status,latitude,longitude,heading,speed_kmh,\
                 fuel_level,payload_tons,odometer_km,engine_hours,updated_at\n",
            );
            for t in &trucks {
                let (lat, lng) = match t.position {
                    Some(p) => (p.latitude.to_string(), p.longitude.to_string()),
                    None => (String::new(), String::new()),
                };
                out.push_str(&format!(
                    "{},{},{},{},{},{},{},{},{},{},{},{}\n",
                    t.id,
                    t.plate_number,
                    t.status,
                    lat,
                    lng,
                    t.heading,
                    t.speed_kmh,
                    t.fuel_level,
                    t.payload_tons,
                    t.odometer_km,
                    t.engine_hours,
                    t.updated_at.to_rfc3339(),
                ));
            }
            out
        }
    };

    std::fs::write(output, contents)?;
    info!("✅ Exported {} trucks to {}", trucks.len(), output.display());
    Ok(())
}

// ── cleanup ────────────────────────────────────────────────────────

async fn cleanup(
    repos: &dyn RepositoryProvider,
    older_than_days: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let cutoff = Utc::now() - ChronoDuration::days(i64::from(older_than_days));

    let samples = repos.locations().prune_before(cutoff).await?;
    let alerts = repos.alerts().delete_resolved_before(cutoff).await?;

    info!(
        "✅ Cleanup done: {} location samples and {} resolved alerts older than {} days removed",
        samples, alerts, older_than_days
    );
    Ok(())
}
