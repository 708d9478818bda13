use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::bus::BusService;

#[derive(Clone)]
pub struct HealthState {
    pub service: Arc<dyn BusService>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Whether the service is running
    pub healthy: bool,
    /// Whether the bus store answered the probe
    pub database_reachable: bool,
    /// Number of buses currently stored
    pub bus_count: usize,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    match state.service.get_buses().await {
        Ok(buses) => Json(HealthResponse {
            healthy: true,
            database_reachable: true,
            bus_count: buses.len(),
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Health probe could not reach the bus store");
            Json(HealthResponse {
                healthy: true,
                database_reachable: false,
                bus_count: 0,
            })
        }
    }
}

pub fn router(service: Arc<dyn BusService>) -> Router {
    let state = HealthState { service };
    Router::new()
        .route("/", get(health_check))
        .with_state(state)
}
