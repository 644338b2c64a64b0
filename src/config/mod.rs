use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::services::SimulationProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub orders: OrdersConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

/// Simulation knobs for the catalog backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_menu_failure_rate")]
    pub menu_failure_rate: f64,
    #[serde(default = "default_min_latency")]
    pub menu_min_latency_ms: u64,
    #[serde(default = "default_max_latency")]
    pub menu_max_latency_ms: u64,
}

/// Simulation knobs for the order backend.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersConfig {
    #[serde(default = "default_order_failure_rate")]
    pub order_failure_rate: f64,
    #[serde(default = "default_min_latency")]
    pub order_min_latency_ms: u64,
    #[serde(default = "default_max_latency")]
    pub order_max_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let server = ServerConfig::from_env()?;
        let catalog = CatalogConfig::from_env()?;
        let orders = OrdersConfig::from_env()?;
        let observability = ObservabilityConfig::from_env()?;

        let config = Config {
            server,
            catalog,
            orders,
            observability,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        for (name, rate) in [
            ("menu_failure_rate", self.catalog.menu_failure_rate),
            ("order_failure_rate", self.orders.order_failure_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be between 0.0 and 1.0, got {}", name, rate),
                });
            }
        }

        if self.catalog.menu_min_latency_ms > self.catalog.menu_max_latency_ms {
            return Err(ConfigError::ValidationError {
                message: "menu_min_latency_ms cannot exceed menu_max_latency_ms".to_string(),
            });
        }

        if self.orders.order_min_latency_ms > self.orders.order_max_latency_ms {
            return Err(ConfigError::ValidationError {
                message: "order_min_latency_ms cannot exceed order_max_latency_ms".to_string(),
            });
        }

        Ok(())
    }
}

fn load_section<T: serde::de::DeserializeOwned>(section: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("PIZZERIA"))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("server")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("catalog")
    }

    pub fn simulation_profile(&self) -> SimulationProfile {
        SimulationProfile::new(
            self.menu_failure_rate,
            self.menu_min_latency_ms,
            self.menu_max_latency_ms,
        )
    }
}

impl OrdersConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("orders")
    }

    pub fn simulation_profile(&self) -> SimulationProfile {
        SimulationProfile::new(
            self.order_failure_rate,
            self.order_min_latency_ms,
            self.order_max_latency_ms,
        )
    }
}

impl ObservabilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("observability")
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}

pub(crate) fn default_menu_failure_rate() -> f64 {
    0.1
}

pub(crate) fn default_order_failure_rate() -> f64 {
    0.2
}

pub(crate) fn default_min_latency() -> u64 {
    200
}

pub(crate) fn default_max_latency() -> u64 {
    900
}

pub(crate) fn default_service_name() -> String {
    "pizzeria-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_enable_json_logging() -> bool {
    std::env::var("PIZZERIA_ENABLE_JSON_LOGGING")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
