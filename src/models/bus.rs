use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category of a bus, as stored and as exposed on the wire
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusType {
    Ac,
    NonAc,
    Sleeper,
    Seater,
}

impl BusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusType::Ac => "AC",
            BusType::NonAc => "NON_AC",
            BusType::Sleeper => "SLEEPER",
            BusType::Seater => "SEATER",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown bus type: {0}")]
pub struct ParseBusTypeError(pub String);

impl FromStr for BusType {
    type Err = ParseBusTypeError;

    /// Case-insensitive; accepts `-` in place of `_` (e.g. "non-ac")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "AC" => Ok(BusType::Ac),
            "NON_AC" => Ok(BusType::NonAc),
            "SLEEPER" => Ok(BusType::Sleeper),
            "SEATER" => Ok(BusType::Seater),
            _ => Err(ParseBusTypeError(s.to_string())),
        }
    }
}

/// A scheduled bus run between two locations on a given date
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Bus {
    pub bus_id: String,
    pub bus_name: String,
    pub bus_type: BusType,
    pub source: String,
    pub destination: String,
    pub journey_date: NaiveDate,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub total_seats: i64,
    pub fare: f64,
}

/// Payload for creating or updating a bus
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BusRequest {
    /// Omit on create to have an id generated; required on update
    pub bus_id: Option<String>,
    pub bus_name: String,
    pub bus_type: BusType,
    pub source: String,
    pub destination: String,
    /// Date of the journey (YYYY-MM-DD)
    pub journey_date: NaiveDate,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub total_seats: i64,
    pub fare: f64,
}

/// One-to-one projection of a stored bus
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BusResponse {
    pub bus_id: String,
    pub bus_name: String,
    pub bus_type: BusType,
    pub source: String,
    pub destination: String,
    pub journey_date: NaiveDate,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub total_seats: i64,
    pub fare: f64,
}

impl From<Bus> for BusResponse {
    fn from(bus: Bus) -> Self {
        Self {
            bus_id: bus.bus_id,
            bus_name: bus.bus_name,
            bus_type: bus.bus_type,
            source: bus.source,
            destination: bus.destination,
            journey_date: bus.journey_date,
            departure_time: bus.departure_time,
            arrival_time: bus.arrival_time,
            total_seats: bus.total_seats,
            fare: bus.fare,
        }
    }
}
