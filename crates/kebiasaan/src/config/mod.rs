use crate::habits::{RollUpPolicy, RubricConfig, RubricError};
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Every environment variable read by [`AppConfig::load`].
pub const ENV_KEYS: [&str; 9] = [
    "APP_ENV",
    "APP_HOST",
    "APP_PORT",
    "APP_LOG_LEVEL",
    "APP_DATA_PATH",
    "APP_RUBRIC_UPPER_RATIO",
    "APP_RUBRIC_LOWER_RATIO",
    "APP_RUBRIC_ROLL_UP",
    "APP_RUBRIC_MAX_SCORE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Unrecognised names fall back to development.
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub rubric: RubricConfig,
}

impl AppConfig {
    /// Read configuration from the process environment, after merging a
    /// `.env` file when one is present. Blank variables count as unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = var("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(AppEnvironment::Development);

        let server = ServerConfig {
            host: var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: number("APP_PORT", 3000)?,
        };

        let telemetry = TelemetryConfig {
            log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        let data = DataConfig {
            dataset_path: var("APP_DATA_PATH").map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            data,
            rubric: rubric_from_env()?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match var(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

fn rubric_from_env() -> Result<RubricConfig, ConfigError> {
    let defaults = RubricConfig::default();

    let roll_up = match var("APP_RUBRIC_ROLL_UP") {
        Some(value) => RollUpPolicy::parse(&value).ok_or(ConfigError::InvalidRollUp(value))?,
        None => defaults.roll_up,
    };

    let rubric = RubricConfig {
        upper_ratio: number("APP_RUBRIC_UPPER_RATIO", defaults.upper_ratio)?,
        lower_ratio: number("APP_RUBRIC_LOWER_RATIO", defaults.lower_ratio)?,
        roll_up,
        max_score: number("APP_RUBRIC_MAX_SCORE", defaults.max_score)?,
    };
    rubric.validate().map_err(ConfigError::Rubric)?;
    Ok(rubric)
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `localhost` is accepted as an alias for the IPv4 loopback.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the server finds its seed dataset, if any.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub dataset_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        key: &'static str,
        value: String,
    },
    InvalidRollUp(String),
    Rubric(RubricError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "APP_HOST '{host}' is not an IPv4/IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be numeric, got '{value}'")
            }
            ConfigError::InvalidRollUp(value) => write!(
                f,
                "APP_RUBRIC_ROLL_UP must be 'average' or 'weakest', got '{value}'"
            ),
            ConfigError::Rubric(err) => write!(f, "invalid rubric: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::Rubric(err) => Some(err),
            ConfigError::InvalidNumber { .. } | ConfigError::InvalidRollUp(_) => None,
        }
    }
}
