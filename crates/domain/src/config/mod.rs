//! Configuration module for certwatch
//!
//! Structures are organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding
//! - `cache`: Capacities and TTLs of the metadata caches
//! - `probe`: TLS and DNS probe budgets
//! - `refresh`: Background DNS refresh queue
//! - `bulk`: Bulk enrichment and cache prewarming
//! - `alerts`: Expiry alert schedules
//! - `logging`: Logging settings
//! - `database`: Database configuration
//! - `errors`: Configuration errors

pub mod alerts;
pub mod bulk;
pub mod cache;
pub mod database;
pub mod errors;
pub mod logging;
pub mod probe;
pub mod refresh;
pub mod root;
pub mod server;

pub use alerts::{AlertSchedule, AlertsConfig};
pub use bulk::BulkConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use probe::ProbeConfig;
pub use refresh::RefreshConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
