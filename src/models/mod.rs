pub mod bus;

pub use bus::{Bus, BusRequest, BusResponse, BusType, ParseBusTypeError};
