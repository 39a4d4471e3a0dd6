use super::{
    AlertsConfig, BulkConfig, CacheConfig, ConfigError, DatabaseConfig, LoggingConfig,
    ProbeConfig, RefreshConfig, ServerConfig,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "certwatch.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub bulk: BulkConfig,

    #[serde(default)]
    pub alerts: AlertsConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.certificate_capacity == 0
            || self.cache.failure_capacity == 0
            || self.cache.dns_capacity == 0
        {
            return Err(ConfigError::Validation(
                "cache capacities must be greater than zero".to_string(),
            ));
        }

        if self.bulk.chunk_size == 0 {
            return Err(ConfigError::Validation(
                "bulk.chunk_size must be greater than zero".to_string(),
            ));
        }

        if self.bulk.prewarm_limit > 0 && self.bulk.prewarm_batch_size == 0 {
            return Err(ConfigError::Validation(
                "bulk.prewarm_batch_size must be greater than zero".to_string(),
            ));
        }

        if self.refresh.batch_size == 0 || self.refresh.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh.batch_size and refresh.interval_secs must be greater than zero"
                    .to_string(),
            ));
        }

        if self.probe.tls_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "probe.tls_timeout_ms must be greater than zero".to_string(),
            ));
        }

        for schedule in &self.alerts.schedules {
            if schedule.hour > 23 || schedule.minute > 59 {
                return Err(ConfigError::Validation(format!(
                    "invalid alert time {:02}:{:02} for {}",
                    schedule.hour, schedule.minute, schedule.threshold
                )));
            }
        }

        self.display_timezone()?;
        Ok(())
    }

    pub fn display_timezone(&self) -> Result<Tz, ConfigError> {
        self.probe.display_timezone.parse::<Tz>().map_err(|_| {
            ConfigError::Validation(format!(
                "unknown timezone '{}'",
                self.probe.display_timezone
            ))
        })
    }
}
