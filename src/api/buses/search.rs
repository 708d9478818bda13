use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};

use super::BusesState;
use crate::api::{bad_request, service_error, ApiError, ErrorResponse};
use crate::models::{BusResponse, BusType};

/// Parse a `YYYY-MM-DD` path value
pub(super) fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| bad_request(format!("invalid date: {raw}")))
}

/// Timestamps arrive either ISO 8601 (`2026-09-01T08:00:00`) or in the
/// space-separated form (`2026-09-01 08:00:00`)
pub(super) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ApiError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| bad_request(format!("invalid timestamp: {raw}")))
}

/// Get buses by name
#[utoipa::path(
    get,
    path = "/Bus/getBusByName/{bus_name}",
    params(
        ("bus_name" = String, Path, description = "Name of the bus to fetch")
    ),
    responses(
        (status = 200, description = "Buses with the given name", body = Vec<BusResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_buses_by_name(
    State(state): State<BusesState>,
    Path(bus_name): Path<String>,
) -> Result<Json<Vec<BusResponse>>, ApiError> {
    let buses = state
        .service
        .get_buses_by_name(&bus_name)
        .await
        .map_err(service_error)?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}

/// Get buses by source, destination and journey date
#[utoipa::path(
    get,
    path = "/Bus/getBusBySourceAndDestinationByTime/{source}/{destination}/{date}",
    params(
        ("source" = String, Path, description = "Source of the bus route"),
        ("destination" = String, Path, description = "Destination of the bus route"),
        ("date" = String, Path, description = "Journey date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Buses matching the route and date", body = Vec<BusResponse>),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_buses_by_source_and_destination(
    State(state): State<BusesState>,
    Path((source, destination, date)): Path<(String, String, String)>,
) -> Result<Json<Vec<BusResponse>>, ApiError> {
    let journey_date = parse_date(&date)?;
    let buses = state
        .service
        .get_buses_by_source_and_destination(&source, &destination, journey_date)
        .await
        .map_err(service_error)?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}

/// Get buses by departure time
#[utoipa::path(
    get,
    path = "/Bus/getBusBytime/{time}",
    params(
        ("time" = String, Path, description = "Departure timestamp (YYYY-MM-DDTHH:MM:SS)")
    ),
    responses(
        (status = 200, description = "Buses departing at the given time", body = Vec<BusResponse>),
        (status = 400, description = "Malformed timestamp", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_buses_by_time(
    State(state): State<BusesState>,
    Path(time): Path<String>,
) -> Result<Json<Vec<BusResponse>>, ApiError> {
    let departure_time = parse_timestamp(&time)?;
    let buses = state
        .service
        .get_buses_by_time(departure_time)
        .await
        .map_err(service_error)?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}

/// Get buses by type
#[utoipa::path(
    get,
    path = "/Bus/busType/{bus_type}",
    params(
        ("bus_type" = String, Path, description = "Bus type (AC, NON_AC, SLEEPER, SEATER)")
    ),
    responses(
        (status = 200, description = "Buses of the given type", body = Vec<BusResponse>),
        (status = 400, description = "Unknown bus type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_buses_by_type(
    State(state): State<BusesState>,
    Path(bus_type): Path<String>,
) -> Result<Json<Vec<BusResponse>>, ApiError> {
    let bus_type: BusType = bus_type
        .parse()
        .map_err(|e: crate::models::ParseBusTypeError| bad_request(e.to_string()))?;
    let buses = state
        .service
        .get_buses_by_type(bus_type)
        .await
        .map_err(service_error)?;
    Ok(Json(buses.into_iter().map(Into::into).collect()))
}
