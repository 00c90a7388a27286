//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, form, query, or path values) never
//! reach a handler. The configs below turn them into `invalid_request`
//! payloads carrying `details.field` and `details.code`, so clients see the
//! same error shape as domain validation failures.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    MalformedBody,
    MalformedQuery,
    InvalidId,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Build the error for a value rejected by domain validation.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

/// Parse an RFC 3339 timestamp query parameter into UTC.
pub(crate) fn parse_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, value))
}

/// Pull the field name out of serde's "missing field `name`" message.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next().filter(|name| !name.is_empty())
}

fn deserialize_error(message: &str, fallback_field: &str, fallback: ErrorCode) -> Error {
    match missing_field_name(message) {
        Some(field) => ValidationError::new(field, format!("missing required field: {field}"))
            .with_code(ErrorCode::MissingField),
        None => ValidationError::new(fallback_field, message).with_code(fallback),
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    let error = match &err {
        JsonPayloadError::Deserialize(source) => {
            deserialize_error(&source.to_string(), "body", ErrorCode::MalformedBody)
        }
        other => {
            ValidationError::new("body", other.to_string()).with_code(ErrorCode::MalformedBody)
        }
    };
    error.into()
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected form payload");
    let error = match &err {
        UrlencodedError::Parse(source) => {
            deserialize_error(&source.to_string(), "body", ErrorCode::MalformedBody)
        }
        other => {
            ValidationError::new("body", other.to_string()).with_code(ErrorCode::MalformedBody)
        }
    };
    error.into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    let error = match &err {
        QueryPayloadError::Deserialize(source) => {
            deserialize_error(&source.to_string(), "query", ErrorCode::MalformedQuery)
        }
        other => {
            ValidationError::new("query", other.to_string()).with_code(ErrorCode::MalformedQuery)
        }
    };
    error.into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameter");
    ValidationError::new("id", "path identifier must be an integer")
        .with_code(ErrorCode::InvalidId)
        .into()
}

/// JSON extractor config mapping failures to `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Form extractor config mapping failures to `invalid_request`.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(form_error)
}

/// Query extractor config mapping failures to `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Path extractor config mapping failures to `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
