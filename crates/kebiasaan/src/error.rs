use crate::config::ConfigError;
use crate::habits::dates::InvalidMonthKey;
use crate::habits::domain::UnknownCategory;
use crate::habits::import::ImportError;
use crate::habits::repository::RepositoryError;
use crate::habits::service::RecapServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Import(ImportError),
    Month(InvalidMonthKey),
    Category(UnknownCategory),
    MissingParameter(&'static str),
    NotFound(String),
    Recap(RecapServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Month(err) => write!(f, "invalid month: {}", err),
            AppError::Category(err) => write!(f, "invalid category: {}", err),
            AppError::MissingParameter(name) => {
                write!(f, "query parameter '{}' is required", name)
            }
            AppError::NotFound(what) => write!(f, "{} not found", what),
            AppError::Recap(err) => write!(f, "recap error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Month(err) => Some(err),
            AppError::Category(err) => Some(err),
            AppError::Recap(err) => Some(err),
            AppError::MissingParameter(_) | AppError::NotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_)
            | AppError::Month(_)
            | AppError::Category(_)
            | AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_)
            | AppError::Recap(RecapServiceError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Recap(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<InvalidMonthKey> for AppError {
    fn from(value: InvalidMonthKey) -> Self {
        Self::Month(value)
    }
}

impl From<UnknownCategory> for AppError {
    fn from(value: UnknownCategory) -> Self {
        Self::Category(value)
    }
}

impl From<RecapServiceError> for AppError {
    fn from(value: RecapServiceError) -> Self {
        Self::Recap(value)
    }
}
