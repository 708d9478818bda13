use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::BusesState;
use crate::api::{service_error, ApiError, ErrorResponse};
use crate::models::BusResponse;
use crate::services::bus::ConnectedBuses;

/// A two-leg journey joined at an intermediate transfer location
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectedBusResponse {
    pub first_leg: BusResponse,
    pub second_leg: BusResponse,
    /// Location where the passenger changes buses
    pub transfer_point: String,
}

impl From<ConnectedBuses> for ConnectedBusResponse {
    fn from(journey: ConnectedBuses) -> Self {
        let transfer_point = journey.first_leg.destination.clone();
        Self {
            first_leg: journey.first_leg.into(),
            second_leg: journey.second_leg.into(),
            transfer_point,
        }
    }
}

/// Get connected buses between a source and a destination
#[utoipa::path(
    get,
    path = "/Bus/connectedBuses/{first_bus_source}/{second_bus_destination}",
    params(
        ("first_bus_source" = String, Path, description = "Source of the first bus leg"),
        ("second_bus_destination" = String, Path, description = "Destination of the second bus leg")
    ),
    responses(
        (status = 200, description = "Two-leg journeys between the locations", body = Vec<ConnectedBusResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_connected_buses(
    State(state): State<BusesState>,
    Path((first_bus_source, second_bus_destination)): Path<(String, String)>,
) -> Result<Json<Vec<ConnectedBusResponse>>, ApiError> {
    let journeys = state
        .service
        .get_connected_buses(&first_bus_source, &second_bus_destination)
        .await
        .map_err(service_error)?;
    Ok(Json(journeys.into_iter().map(Into::into).collect()))
}
