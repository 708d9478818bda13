pub mod buses;
pub mod error;
pub mod health;

pub use error::{bad_request, service_error, ApiError, ErrorResponse};

use std::sync::Arc;

use axum::Router;

use crate::services::bus::BusService;

pub fn router(service: Arc<dyn BusService>) -> Router {
    Router::new()
        .nest("/Bus", buses::router(service.clone()))
        .nest("/health", health::router(service))
}
