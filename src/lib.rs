pub mod config;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;

pub use config::{Config, ConfigError};
pub use observability::{init_observability, Metrics, ObservabilityError};
