mod connections;
mod crud;
mod search;

pub use connections::*;
pub use crud::*;
pub use search::*;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::services::bus::BusService;

#[derive(Clone)]
pub struct BusesState {
    pub service: Arc<dyn BusService>,
}

pub fn router(service: Arc<dyn BusService>) -> Router {
    let state = BusesState { service };
    Router::new()
        .route("/create", post(create_bus))
        .route("/update", put(update_bus))
        .route("/delete/{bus_id}", delete(delete_bus))
        .route("/getAllBuses", get(get_all_buses))
        .route("/getBusByName/{bus_name}", get(get_buses_by_name))
        .route(
            "/getBusBySourceAndDestinationByTime/{source}/{destination}/{date}",
            get(get_buses_by_source_and_destination),
        )
        .route("/getBusBytime/{time}", get(get_buses_by_time))
        .route("/busType/{bus_type}", get(get_buses_by_type))
        .route(
            "/connectedBuses/{first_bus_source}/{second_bus_destination}",
            get(get_connected_buses),
        )
        .route("/getBusByBusId/{bus_id}", get(get_bus_by_bus_id))
        .with_state(state)
}
