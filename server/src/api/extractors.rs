//! Path and validation extractors for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::constants::MAX_ID_LENGTH;

/// Raw path extractor for `{id}` routes (internal use)
#[derive(Debug, Deserialize)]
struct IdPathRaw {
    id: String,
}

/// Validated resource ID path extractor.
///
/// Returns a 400 Bad Request if the ID is empty or longer than `MAX_ID_LENGTH`.
#[derive(Debug)]
pub struct IdPath {
    pub id: String,
}

/// Validate generic ID length
pub fn is_valid_id(id: &str) -> bool {
    !id.trim().is_empty() && id.len() as u64 <= MAX_ID_LENGTH
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<IdPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        if !is_valid_id(&raw.id) {
            return Err(ValidationRejection::InvalidId);
        }

        Ok(Self { id: raw.id })
    }
}

/// Validation rejection with structured error response
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// ID fails the length check
    InvalidId,
    /// Failed to parse query string
    Query(QueryRejection),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Path(rejection) => ("PATH_PARSE_ERROR", rejection.body_text()),
            Self::InvalidId => ("INVALID_ID", "Invalid or missing ID".to_string()),
            Self::Query(rejection) => ("QUERY_PARSE_ERROR", rejection.body_text()),
            Self::Json(rejection) => ("JSON_PARSE_ERROR", rejection.body_text()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_validation_messages(errors, "", &mut messages);
    messages.sort();
    messages.join("; ")
}

fn collect_validation_messages(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<String>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            validator::ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: validation failed", path))
                }));
            }
            validator::ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(nested, &path, out);
            }
            validator::ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// Query extractor with automatic validation.
///
/// Deserializes query parameters and validates them using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("clx0abc123"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("   "));
        assert!(is_valid_id(&"a".repeat(MAX_ID_LENGTH as usize)));
        assert!(!is_valid_id(&"a".repeat(MAX_ID_LENGTH as usize + 1)));
    }

    #[derive(Debug, Validate)]
    struct Inner {
        #[validate(range(min = 0.0, message = "hourlyRate must be >= 0"))]
        rate: f64,
    }

    #[derive(Debug, Validate)]
    struct Outer {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(nested)]
        inner: Inner,
    }

    #[test]
    fn test_format_validation_errors_includes_nested() {
        let errors = Outer {
            name: String::new(),
            inner: Inner { rate: -1.0 },
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "hourlyRate must be >= 0; name must not be empty"
        );
    }
}
