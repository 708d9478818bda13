use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::bus::BusServiceError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a service failure onto its HTTP status
pub fn service_error(err: BusServiceError) -> ApiError {
    let status = match &err {
        BusServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        BusServiceError::AlreadyExists(_) => StatusCode::CONFLICT,
        BusServiceError::MissingBusId => StatusCode::BAD_REQUEST,
        BusServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "Bus service failure");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
