//! API error bridge: one discriminated result type for every handler.
//!
//! Core errors carry their taxonomy; this module maps it onto status codes:
//! validation 422, stale state 409, missing records 404, everything else 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use wayfare_core::errors::DatabaseError;
use wayfare_core::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::GuestValidation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Guest list validation failed",
                    "fields": errors.errors,
                }),
            ),
            Error::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": e.to_string() }),
            ),
            Error::Transition(e) => (StatusCode::CONFLICT, json!({ "error": e.to_string() })),
            Error::Precondition(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            Error::Database(DatabaseError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, json!({ "error": msg }))
            }
            other => {
                tracing::error!("Unhandled API error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
