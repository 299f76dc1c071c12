use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Crates whose spans and events follow a bare `APP_LOG_LEVEL`.
const RECAP_TARGETS: [&str; 2] = ["kebiasaan", "kebiasaan_api"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { value: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{}' is not a valid log filter", value)
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a tracing subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// A bare level such as `debug` applies to the recap crates only and keeps
/// dependencies at `warn`. Anything containing `=` or `,` is passed through
/// as a full directive list.
pub fn parse_filter(value: &str) -> Result<EnvFilter, TelemetryError> {
    let trimmed = value.trim();
    let directives = if trimmed.contains('=') || trimmed.contains(',') {
        trimmed.to_string()
    } else {
        let scoped: Vec<String> = RECAP_TARGETS
            .iter()
            .map(|target| format!("{target}={trimmed}"))
            .collect();
        format!("warn,{}", scoped.join(","))
    };

    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::InvalidFilter {
        value: value.to_string(),
        source,
    })
}
