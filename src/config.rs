//! Application configuration
//!
//! Loaded from a TOML file. Every field has a default matching the
//! reference constants, so a missing file and an empty file behave
//! identically.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::services::SimulatorConfig;
use crate::domain::GeoBounds;

/// Configuration load error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub simulator: SimulatorSettings,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// API port
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL, e.g. `sqlite://./fleet.db?mode=rwc`
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./fleet.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 10,
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Secret key for signing JWT tokens
    pub jwt_secret: String,
    /// Token expiration time in hours
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing env-filter directive, e.g. `info` or `fleet=debug,sea_orm=warn`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Bootstrap admin account, created at startup when no users exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@texnouz.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Position simulator settings
///
/// The geographic bounding box is a compile-time constant of the bounds
/// module, not a config key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Whether the simulator task runs at all
    pub enabled: bool,
    pub tick_interval_secs: u64,
    pub min_vehicles_per_tick: usize,
    pub max_vehicles_per_tick: usize,
    pub position_jitter_deg: f64,
    pub max_speed_kmh: f64,
    pub heading_jitter_deg: f64,
    pub max_fuel_burn_pct: f64,
    pub tire_event_probability: f64,
    pub tire_jitter_psi: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        let base = SimulatorConfig::default();
        Self {
            enabled: true,
            tick_interval_secs: base.tick_interval_secs,
            min_vehicles_per_tick: base.min_trucks_per_tick,
            max_vehicles_per_tick: base.max_trucks_per_tick,
            position_jitter_deg: base.position_jitter_deg,
            max_speed_kmh: base.max_speed_kmh,
            heading_jitter_deg: base.heading_jitter_deg,
            max_fuel_burn_pct: base.max_fuel_burn_pct,
            tire_event_probability: base.tire_event_probability,
            tire_jitter_psi: base.tire_jitter_psi,
        }
    }
}

impl SimulatorSettings {
    pub fn to_simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            tick_interval_secs: self.tick_interval_secs,
            min_trucks_per_tick: self.min_vehicles_per_tick,
            max_trucks_per_tick: self.max_vehicles_per_tick,
            position_jitter_deg: self.position_jitter_deg,
            max_speed_kmh: self.max_speed_kmh,
            heading_jitter_deg: self.heading_jitter_deg,
            max_fuel_burn_pct: self.max_fuel_burn_pct,
            tire_event_probability: self.tire_event_probability,
            tire_jitter_psi: self.tire_jitter_psi,
            bounds: GeoBounds::default(),
        }
    }
}

/// Default configuration file location
/// (`<config_dir>/fleet-telemetry/config.toml`)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleet-telemetry")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_equals_defaults() {
        let parsed: AppConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn partial_section_keeps_sibling_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9999

            [simulator]
            enabled = false
            tick_interval_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 9999);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert!(!parsed.simulator.enabled);
        assert_eq!(parsed.simulator.tick_interval_secs, 30);
        assert_eq!(
            parsed.simulator.max_vehicles_per_tick,
            SimulatorSettings::default().max_vehicles_per_tick
        );
        assert_eq!(parsed.database, DatabaseSettings::default());
    }

    #[test]
    fn simulator_settings_convert_to_runtime_config() {
        let settings = SimulatorSettings {
            min_vehicles_per_tick: 3,
            max_vehicles_per_tick: 7,
            ..SimulatorSettings::default()
        };

        let config = settings.to_simulator_config();
        assert_eq!(config.min_trucks_per_tick, 3);
        assert_eq!(config.max_trucks_per_tick, 7);
        assert_eq!(config.bounds, GeoBounds::default());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = AppConfig::load(Path::new("/nonexistent/fleet-config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            shutdown_timeout_secs: 10,
        };
        assert_eq!(server.address(), "127.0.0.1:8080");
    }
}
