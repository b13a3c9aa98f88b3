//! Errors surfaced to API clients

use crate::types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// A request the service cannot score.
///
/// Every variant is reported to the client as HTTP 400 with the display text
/// in the `detail` field.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid request body: {reason}")]
    MalformedBody { reason: String },

    #[error("expected a JSON object of features, got {found}")]
    NotAnObject { found: &'static str },

    #[error("feature '{key}' must be a number, got {found}")]
    NonNumeric { key: String, found: &'static str },
}

impl InputError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Name of a JSON value's type, as reported in error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
