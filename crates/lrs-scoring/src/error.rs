use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::profile::ProfileError;
use crate::tables::TableImportError;
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
    Profile(ProfileError),
    Tables(TableImportError),
    Catalog(CatalogError),
    Answers(serde_json::Error),
    Serialize(serde_json::Error),
    Render(fmt::Error),
    QuestionsUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Profile(err) if !err.is_reference_data_failure() => StatusCode::BAD_REQUEST,
            AppError::Answers(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Profile(_)
            | AppError::Tables(_)
            | AppError::Catalog(_)
            | AppError::Serialize(_)
            | AppError::Render(_)
            | AppError::QuestionsUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Profile(err) => write!(f, "{}", err),
            AppError::Tables(err) => write!(f, "table import error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Answers(err) => write!(f, "invalid answers: {}", err),
            AppError::Serialize(err) => write!(f, "failed to serialize output: {}", err),
            AppError::Render(err) => write!(f, "failed to render report: {}", err),
            AppError::QuestionsUnavailable => f.write_str("Questions file not loaded"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Profile(err) => Some(err),
            AppError::Tables(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Answers(err) => Some(err),
            AppError::Serialize(err) => Some(err),
            AppError::Render(err) => Some(err),
            AppError::QuestionsUnavailable => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
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

impl From<ProfileError> for AppError {
    fn from(value: ProfileError) -> Self {
        Self::Profile(value)
    }
}

impl From<TableImportError> for AppError {
    fn from(value: TableImportError) -> Self {
        Self::Tables(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Parse failures on caller-supplied JSON. Serialization failures use
/// [`AppError::Serialize`] explicitly.
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Answers(value)
    }
}

impl From<fmt::Error> for AppError {
    fn from(value: fmt::Error) -> Self {
        Self::Render(value)
    }
}
