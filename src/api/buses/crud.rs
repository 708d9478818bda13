use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::BusesState;
use crate::api::{service_error, ApiError, ErrorResponse};
use crate::models::{BusRequest, BusResponse};

/// Create a new bus
#[utoipa::path(
    post,
    path = "/Bus/create",
    request_body = BusRequest,
    responses(
        (status = 200, description = "Details of the created bus", body = BusResponse),
        (status = 409, description = "A bus with this id already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn create_bus(
    State(state): State<BusesState>,
    Json(request): Json<BusRequest>,
) -> Result<Json<BusResponse>, ApiError> {
    let bus = state.service.create(request).await.map_err(service_error)?;
    Ok(Json(bus.into()))
}

/// Update an existing bus
#[utoipa::path(
    put,
    path = "/Bus/update",
    request_body = BusRequest,
    responses(
        (status = 200, description = "Details of the updated bus", body = BusResponse),
        (status = 400, description = "Missing bus id", body = ErrorResponse),
        (status = 404, description = "Bus not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn update_bus(
    State(state): State<BusesState>,
    Json(request): Json<BusRequest>,
) -> Result<Json<BusResponse>, ApiError> {
    let bus = state.service.update(request).await.map_err(service_error)?;
    Ok(Json(bus.into()))
}

/// Delete a bus by its id
#[utoipa::path(
    delete,
    path = "/Bus/delete/{bus_id}",
    params(
        ("bus_id" = String, Path, description = "Id of the bus to delete")
    ),
    responses(
        (status = 204, description = "Bus deleted"),
        (status = 404, description = "Bus not found", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn delete_bus(
    State(state): State<BusesState>,
    Path(bus_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete(&bus_id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all buses
#[utoipa::path(
    get,
    path = "/Bus/getAllBuses",
    responses(
        (status = 200, description = "Details of all buses", body = Vec<BusResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_all_buses(
    State(state): State<BusesState>,
) -> Result<Json<Vec<BusResponse>>, ApiError> {
    let buses = state.service.get_buses().await.map_err(service_error)?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}

/// Get a single bus by its id
#[utoipa::path(
    get,
    path = "/Bus/getBusByBusId/{bus_id}",
    params(
        ("bus_id" = String, Path, description = "Id of the bus to fetch")
    ),
    responses(
        (status = 200, description = "Details of the bus", body = BusResponse),
        (status = 404, description = "Bus not found", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_bus_by_bus_id(
    State(state): State<BusesState>,
    Path(bus_id): Path<String>,
) -> Result<Json<BusResponse>, ApiError> {
    let bus = state
        .service
        .get_bus_by_id(&bus_id)
        .await
        .map_err(service_error)?;
    Ok(Json(bus.into()))
}
