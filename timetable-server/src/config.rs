//! Server configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cache::TimetableCacheConfig;

/// Origins allowed by CORS when running in development mode.
const DEV_ALLOWED_ORIGINS: [&str; 4] = [
    "http://web:3000",
    "http://localhost:3000",
    "http://swagger:8080",
    "http://localhost:8080",
];

/// Errors that can occur when reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Environment::Dev,
            _ => Environment::Prod,
        }
    }
}

/// Configuration for the HTTP server and its data files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: Environment,

    pub host: String,

    pub port: u16,

    /// Directory holding the stop files and the `services/` directory.
    pub data_path: PathBuf,

    /// Stop directory file name, relative to `data_path`.
    pub bus_stops_file: String,

    /// Stop group file name, relative to `data_path`.
    pub bus_stop_groups_file: String,

    /// Comma separated origins, used outside development mode.
    pub cors_allowed_origins: Vec<String>,

    /// How long a built timetable stays cached.
    pub timetable_cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Prod,
            host: "localhost".to_string(),
            port: 8080,
            data_path: PathBuf::from("./data"),
            bus_stops_file: "bus_stops.json".to_string(),
            bus_stop_groups_file: "bus_stop_groups.json".to_string(),
            cors_allowed_origins: Vec::new(),
            timetable_cache_ttl: TimetableCacheConfig::default().ttl,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => defaults.port,
        };
        let timetable_cache_ttl = match var("TIMETABLE_CACHE_TTL_SECS") {
            Some(value) => Duration::from_secs(parse_number("TIMETABLE_CACHE_TTL_SECS", value)?),
            None => defaults.timetable_cache_ttl,
        };

        Ok(Self {
            environment: var("API_ENV").map_or(defaults.environment, |v| Environment::parse(&v)),
            host: var("HOST").unwrap_or(defaults.host),
            port,
            data_path: var("DATA_PATH").map_or(defaults.data_path, PathBuf::from),
            bus_stops_file: var("BUS_STOPS_FILE").unwrap_or(defaults.bus_stops_file),
            bus_stop_groups_file: var("BUS_STOP_GROUPS_FILE").unwrap_or(defaults.bus_stop_groups_file),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or_default(),
            timetable_cache_ttl,
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == Environment::Dev
    }

    /// Address to bind, as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn bus_stops_path(&self) -> PathBuf {
        self.data_path.join(&self.bus_stops_file)
    }

    pub fn bus_stop_groups_path(&self) -> PathBuf {
        self.data_path.join(&self.bus_stop_groups_file)
    }

    pub fn cache_config(&self) -> TimetableCacheConfig {
        TimetableCacheConfig {
            ttl: self.timetable_cache_ttl,
            ..TimetableCacheConfig::default()
        }
    }

    /// Origins the CORS layer should accept.
    pub fn allowed_origins(&self) -> Vec<String> {
        if self.is_dev() {
            DEV_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
        } else {
            self.cors_allowed_origins.clone()
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
