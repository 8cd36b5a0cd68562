//! Shared API types
//!
//! Common types used across all API endpoints: error handling and the
//! list response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationError;

use crate::core::constants::{MAX_EMAIL_LENGTH, MIN_EMAIL_LENGTH};
use crate::data::DataError;

/// Standard API error response
///
/// Rendered as `{"error": <message>, "code": <CODE>}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify a data layer error
    ///
    /// Constraint violations are client errors; everything else is logged
    /// and answered with a generic message.
    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::Conflict(message) => Self::bad_request("CONFLICT", message),
            DataError::InvalidReference(message) => Self::not_found("NOT_FOUND", message),
            DataError::Invalid(message) => Self::bad_request("VALIDATION_ERROR", message),
            other => {
                tracing::error!(error = %other, transient = other.is_transient(), "Data error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}

/// List response envelope
///
/// An empty result is still a success; `message` explains it.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, empty_message: &str) -> Self {
        let message = data.is_empty().then(|| empty_message.to_string());
        Self { data, message }
    }
}

/// Unix seconds to UTC, falling back to now for out-of-range values
pub fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
}

/// Treat empty or whitespace-only strings as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validator function for email length
///
/// Blank values pass so that "missing" and "unchanged" are decided by the
/// request conversion.
pub fn validate_email_length(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Ok(());
    }
    let len = email.chars().count() as u64;
    if !(MIN_EMAIL_LENGTH..=MAX_EMAIL_LENGTH).contains(&len) {
        return Err(ValidationError::new("email_length").with_message(
            format!(
                "email must be between {} and {} characters",
                MIN_EMAIL_LENGTH, MAX_EMAIL_LENGTH
            )
            .into(),
        ));
    }
    Ok(())
}

/// Parse an optional numeric range bound from a query string
///
/// Blank values are unconstrained; non-numeric or non-finite values are a 400.
pub fn parse_bound(param: &str, raw: Option<&str>) -> Result<Option<f64>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ApiError::bad_request(
            "INVALID_QUERY",
            format!("{} must be a number", param),
        )),
    }
}

/// Error body schema for OpenAPI
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
