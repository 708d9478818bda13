use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::bus::BusRequest;
use crate::models::{Bus, BusType};

#[derive(Debug, thiserror::Error)]
pub enum BusServiceError {
    #[error("bus not found: {0}")]
    NotFound(String),
    #[error("bus already exists: {0}")]
    AlreadyExists(String),
    #[error("bus id is required")]
    MissingBusId,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Two bus legs joined at an intermediate transfer location
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedBuses {
    pub first_leg: Bus,
    pub second_leg: Bus,
}

/// Domain operations behind the bus endpoints. Handlers hold this as a
/// trait object so the storage backend stays swappable.
#[async_trait]
pub trait BusService: Send + Sync {
    async fn create(&self, request: BusRequest) -> Result<Bus, BusServiceError>;
    async fn update(&self, request: BusRequest) -> Result<Bus, BusServiceError>;
    async fn delete(&self, bus_id: &str) -> Result<(), BusServiceError>;
    async fn get_buses(&self) -> Result<Vec<Bus>, BusServiceError>;
    async fn get_buses_by_name(&self, bus_name: &str) -> Result<Vec<Bus>, BusServiceError>;
    async fn get_buses_by_source_and_destination(
        &self,
        source: &str,
        destination: &str,
        journey_date: NaiveDate,
    ) -> Result<Vec<Bus>, BusServiceError>;
    async fn get_buses_by_time(
        &self,
        departure_time: NaiveDateTime,
    ) -> Result<Vec<Bus>, BusServiceError>;
    async fn get_buses_by_type(&self, bus_type: BusType) -> Result<Vec<Bus>, BusServiceError>;
    async fn get_connected_buses(
        &self,
        first_source: &str,
        second_destination: &str,
    ) -> Result<Vec<ConnectedBuses>, BusServiceError>;
    async fn get_bus_by_id(&self, bus_id: &str) -> Result<Bus, BusServiceError>;
}

/// SQLite-backed bus store
pub struct SqliteBusService {
    pool: SqlitePool,
}

impl SqliteBusService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn bus_from_request(bus_id: String, request: BusRequest) -> Bus {
        Bus {
            bus_id,
            bus_name: request.bus_name,
            bus_type: request.bus_type,
            source: request.source,
            destination: request.destination,
            journey_date: request.journey_date,
            departure_time: request.departure_time,
            arrival_time: request.arrival_time,
            total_seats: request.total_seats,
            fare: request.fare,
        }
    }
}

#[async_trait]
impl BusService for SqliteBusService {
    async fn create(&self, request: BusRequest) -> Result<Bus, BusServiceError> {
        let bus_id = request
            .bus_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let bus = Self::bus_from_request(bus_id, request);

        sqlx::query(
            "INSERT INTO buses (bus_id, bus_name, bus_type, source, destination, journey_date, departure_time, arrival_time, total_seats, fare) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&bus.bus_id)
        .bind(&bus.bus_name)
        .bind(bus.bus_type)
        .bind(&bus.source)
        .bind(&bus.destination)
        .bind(bus.journey_date)
        .bind(bus.departure_time)
        .bind(bus.arrival_time)
        .bind(bus.total_seats)
        .bind(bus.fare)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return BusServiceError::AlreadyExists(bus.bus_id.clone());
                }
            }
            BusServiceError::Database(e)
        })?;

        tracing::debug!(bus_id = %bus.bus_id, "Created bus");
        Ok(bus)
    }

    async fn update(&self, request: BusRequest) -> Result<Bus, BusServiceError> {
        let bus_id = request.bus_id.clone().ok_or(BusServiceError::MissingBusId)?;
        let bus = Self::bus_from_request(bus_id, request);

        let result = sqlx::query(
            "UPDATE buses SET bus_name = ?, bus_type = ?, source = ?, destination = ?, journey_date = ?, departure_time = ?, arrival_time = ?, total_seats = ?, fare = ? \
             WHERE bus_id = ?",
        )
        .bind(&bus.bus_name)
        .bind(bus.bus_type)
        .bind(&bus.source)
        .bind(&bus.destination)
        .bind(bus.journey_date)
        .bind(bus.departure_time)
        .bind(bus.arrival_time)
        .bind(bus.total_seats)
        .bind(bus.fare)
        .bind(&bus.bus_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BusServiceError::NotFound(bus.bus_id));
        }
        Ok(bus)
    }

    async fn delete(&self, bus_id: &str) -> Result<(), BusServiceError> {
        let result = sqlx::query("DELETE FROM buses WHERE bus_id = ?")
            .bind(bus_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BusServiceError::NotFound(bus_id.to_string()));
        }
        tracing::debug!(bus_id = %bus_id, "Deleted bus");
        Ok(())
    }

    async fn get_buses(&self) -> Result<Vec<Bus>, BusServiceError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses ORDER BY departure_time, bus_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(buses)
    }

    async fn get_buses_by_name(&self, bus_name: &str) -> Result<Vec<Bus>, BusServiceError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE bus_name = ? ORDER BY departure_time, bus_id",
        )
        .bind(bus_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(buses)
    }

    async fn get_buses_by_source_and_destination(
        &self,
        source: &str,
        destination: &str,
        journey_date: NaiveDate,
    ) -> Result<Vec<Bus>, BusServiceError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE source = ? AND destination = ? AND journey_date = ? \
             ORDER BY departure_time, bus_id",
        )
        .bind(source)
        .bind(destination)
        .bind(journey_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(buses)
    }

    async fn get_buses_by_time(
        &self,
        departure_time: NaiveDateTime,
    ) -> Result<Vec<Bus>, BusServiceError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE departure_time = ? ORDER BY bus_id",
        )
        .bind(departure_time)
        .fetch_all(&self.pool)
        .await?;
        Ok(buses)
    }

    async fn get_buses_by_type(&self, bus_type: BusType) -> Result<Vec<Bus>, BusServiceError> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE bus_type = ? ORDER BY departure_time, bus_id",
        )
        .bind(bus_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(buses)
    }

    /// Journeys are pairs of legs joined where the first leg's destination is
    /// the second leg's source, on the same date, with a feasible transfer
    /// (the second leg departs after the first one arrives).
    async fn get_connected_buses(
        &self,
        first_source: &str,
        second_destination: &str,
    ) -> Result<Vec<ConnectedBuses>, BusServiceError> {
        let first_legs = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE source = ? ORDER BY departure_time, bus_id",
        )
        .bind(first_source)
        .fetch_all(&self.pool)
        .await?;

        let second_legs = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE destination = ? ORDER BY departure_time, bus_id",
        )
        .bind(second_destination)
        .fetch_all(&self.pool)
        .await?;

        // Group candidate second legs by their boarding point and date
        let mut by_transfer: HashMap<(String, NaiveDate), Vec<Bus>> = HashMap::new();
        for leg in second_legs {
            by_transfer
                .entry((leg.source.clone(), leg.journey_date))
                .or_default()
                .push(leg);
        }

        let mut journeys = Vec::new();
        for first in first_legs {
            let key = (first.destination.clone(), first.journey_date);
            let Some(candidates) = by_transfer.get(&key) else {
                continue;
            };
            for second in candidates {
                if second.bus_id != first.bus_id && second.departure_time > first.arrival_time {
                    journeys.push(ConnectedBuses {
                        first_leg: first.clone(),
                        second_leg: second.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            first_source = %first_source,
            second_destination = %second_destination,
            journey_count = journeys.len(),
            "Computed connected buses"
        );
        Ok(journeys)
    }

    async fn get_bus_by_id(&self, bus_id: &str) -> Result<Bus, BusServiceError> {
        let bus = sqlx::query_as::<_, Bus>("SELECT * FROM buses WHERE bus_id = ?")
            .bind(bus_id)
            .fetch_optional(&self.pool)
            .await?;
        bus.ok_or_else(|| BusServiceError::NotFound(bus_id.to_string()))
    }
}
