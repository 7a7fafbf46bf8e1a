//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::{error, warn};
use vidstore_db::DatabaseError;

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// A request argument was absent or failed type coercion
    #[error("missing argument {field}: {help}")]
    MissingArgument {
        field: &'static str,
        help: &'static str,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!(msg)),
            ApiError::MissingArgument { field, help } => {
                let mut fields = Map::new();
                fields.insert(field.to_string(), json!(help));
                (StatusCode::BAD_REQUEST, Value::Object(fields))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, json!(err.to_string())),
            ApiError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!(msg)),
        };

        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Store errors with no request-specific meaning surface as 500s.
/// Handlers map `NotFound` and `Conflict` themselves to pick the message.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ApiError::MissingArgument { field: "name", help: "Name of the video" },
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
