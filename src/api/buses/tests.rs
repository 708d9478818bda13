use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::search::{parse_date, parse_timestamp};
use crate::models::bus::BusRequest;
use crate::models::{Bus, BusType};
use crate::services::bus::{BusService, BusServiceError, ConnectedBuses};

/// Records every delegated call so tests can assert the adapter forwarded
/// exactly once with correctly parsed arguments.
#[derive(Default)]
struct MockBusService {
    calls: Mutex<Vec<String>>,
    buses: Vec<Bus>,
    journeys: Vec<ConnectedBuses>,
}

impl MockBusService {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BusService for MockBusService {
    async fn create(&self, request: BusRequest) -> Result<Bus, BusServiceError> {
        let bus_id = request
            .bus_id
            .clone()
            .unwrap_or_else(|| "generated".to_string());
        self.record(format!("create:{bus_id}"));
        Ok(bus_from_request(bus_id, request))
    }

    async fn update(&self, request: BusRequest) -> Result<Bus, BusServiceError> {
        let bus_id = request.bus_id.clone().ok_or(BusServiceError::MissingBusId)?;
        self.record(format!("update:{bus_id}"));
        Ok(bus_from_request(bus_id, request))
    }

    async fn delete(&self, bus_id: &str) -> Result<(), BusServiceError> {
        self.record(format!("delete:{bus_id}"));
        Ok(())
    }

    async fn get_buses(&self) -> Result<Vec<Bus>, BusServiceError> {
        self.record("getAllBuses".to_string());
        Ok(self.buses.clone())
    }

    async fn get_buses_by_name(&self, bus_name: &str) -> Result<Vec<Bus>, BusServiceError> {
        self.record(format!("getBusByName:{bus_name}"));
        Ok(self
            .buses
            .iter()
            .filter(|b| b.bus_name == bus_name)
            .cloned()
            .collect())
    }

    async fn get_buses_by_source_and_destination(
        &self,
        source: &str,
        destination: &str,
        journey_date: NaiveDate,
    ) -> Result<Vec<Bus>, BusServiceError> {
        self.record(format!(
            "bySourceAndDestination:{source}:{destination}:{journey_date}"
        ));
        Ok(Vec::new())
    }

    async fn get_buses_by_time(
        &self,
        departure_time: NaiveDateTime,
    ) -> Result<Vec<Bus>, BusServiceError> {
        self.record(format!("byTime:{departure_time}"));
        Ok(Vec::new())
    }

    async fn get_buses_by_type(&self, bus_type: BusType) -> Result<Vec<Bus>, BusServiceError> {
        self.record(format!("busType:{}", bus_type.as_str()));
        Ok(Vec::new())
    }

    async fn get_connected_buses(
        &self,
        first_source: &str,
        second_destination: &str,
    ) -> Result<Vec<ConnectedBuses>, BusServiceError> {
        self.record(format!("connectedBuses:{first_source}:{second_destination}"));
        Ok(self.journeys.clone())
    }

    async fn get_bus_by_id(&self, bus_id: &str) -> Result<Bus, BusServiceError> {
        self.record(format!("getBusByBusId:{bus_id}"));
        self.buses
            .iter()
            .find(|b| b.bus_id == bus_id)
            .cloned()
            .ok_or_else(|| BusServiceError::NotFound(bus_id.to_string()))
    }
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

fn fixture_bus(bus_id: &str, bus_name: &str, source: &str, destination: &str) -> Bus {
    Bus {
        bus_id: bus_id.to_string(),
        bus_name: bus_name.to_string(),
        bus_type: BusType::Ac,
        source: source.to_string(),
        destination: destination.to_string(),
        journey_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        departure_time: "2026-09-01T08:00:00".parse().unwrap(),
        arrival_time: "2026-09-01T12:00:00".parse().unwrap(),
        total_seats: 40,
        fare: 450.0,
    }
}

fn bus_json(bus: &Bus) -> Value {
    json!({
        "bus_id": bus.bus_id,
        "bus_name": bus.bus_name,
        "bus_type": bus.bus_type.as_str(),
        "source": bus.source,
        "destination": bus.destination,
        "journey_date": bus.journey_date.to_string(),
        "departure_time": bus.departure_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
        "arrival_time": bus.arrival_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
        "total_seats": bus.total_seats,
        "fare": bus.fare,
    })
}

fn app(service: &Arc<MockBusService>) -> Router {
    super::router(service.clone())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(
        router,
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

fn as_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn get_bus_by_id_passes_the_record_through() {
    let service = Arc::new(MockBusService {
        buses: vec![fixture_bus("B123", "Express", "Pune", "Mumbai")],
        ..Default::default()
    });

    let (status, body) = get(app(&service), "/getBusByBusId/B123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), bus_json(&service.buses[0]));
    assert_eq!(service.calls(), ["getBusByBusId:B123"]);
}

#[tokio::test]
async fn get_bus_by_id_maps_not_found_to_404() {
    let service = Arc::new(MockBusService::default());

    let (status, body) = get(app(&service), "/getBusByBusId/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body), json!({ "error": "bus not found: nope" }));
}

#[tokio::test]
async fn delete_returns_no_content_and_delegates_once() {
    let service = Arc::new(MockBusService::default());

    let (status, body) = send(
        app(&service),
        Request::builder()
            .method("DELETE")
            .uri("/delete/B123")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(service.calls(), ["delete:B123"]);
}

#[tokio::test]
async fn create_forwards_the_payload_unchanged() {
    let service = Arc::new(MockBusService::default());
    let expected = fixture_bus("B9", "Night Rider", "Pune", "Nashik");

    let (status, body) = send(
        app(&service),
        Request::builder()
            .method("POST")
            .uri("/create")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bus_json(&expected).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), bus_json(&expected));
    assert_eq!(service.calls(), ["create:B9"]);
}

#[tokio::test]
async fn update_forwards_the_payload_unchanged() {
    let service = Arc::new(MockBusService::default());
    let expected = fixture_bus("B9", "Night Rider", "Pune", "Nashik");

    let (status, body) = send(
        app(&service),
        Request::builder()
            .method("PUT")
            .uri("/update")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bus_json(&expected).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), bus_json(&expected));
    assert_eq!(service.calls(), ["update:B9"]);
}

#[tokio::test]
async fn get_all_buses_returns_the_full_list() {
    let service = Arc::new(MockBusService {
        buses: vec![
            fixture_bus("B1", "Express", "Pune", "Mumbai"),
            fixture_bus("B2", "Night Rider", "Pune", "Nashik"),
        ],
        ..Default::default()
    });

    let (status, body) = get(app(&service), "/getAllBuses").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!([bus_json(&service.buses[0]), bus_json(&service.buses[1])])
    );
    assert_eq!(service.calls(), ["getAllBuses"]);
}

#[tokio::test]
async fn get_buses_by_name_delegates_with_the_raw_name() {
    let service = Arc::new(MockBusService {
        buses: vec![fixture_bus("B1", "Express", "Pune", "Mumbai")],
        ..Default::default()
    });

    let (status, body) = get(app(&service), "/getBusByName/Express").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!([bus_json(&service.buses[0])]));
    assert_eq!(service.calls(), ["getBusByName:Express"]);
}

#[tokio::test]
async fn route_lookup_parses_the_date_before_delegating() {
    let service = Arc::new(MockBusService::default());

    let (status, _) = get(
        app(&service),
        "/getBusBySourceAndDestinationByTime/Pune/Mumbai/2026-09-01",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        service.calls(),
        ["bySourceAndDestination:Pune:Mumbai:2026-09-01"]
    );
}

#[tokio::test]
async fn route_lookup_rejects_a_malformed_date() {
    let service = Arc::new(MockBusService::default());

    let (status, body) = get(
        app(&service),
        "/getBusBySourceAndDestinationByTime/Pune/Mumbai/tomorrow",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body), json!({ "error": "invalid date: tomorrow" }));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn time_lookup_accepts_both_timestamp_forms() {
    let service = Arc::new(MockBusService::default());

    let (status, _) = get(app(&service), "/getBusBytime/2026-09-01T08:00:00").await;
    assert_eq!(status, StatusCode::OK);

    // java.sql.Timestamp style, percent-encoded space
    let (status, _) = get(app(&service), "/getBusBytime/2026-09-01%2008:00:00").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        service.calls(),
        ["byTime:2026-09-01 08:00:00", "byTime:2026-09-01 08:00:00"]
    );
}

#[tokio::test]
async fn time_lookup_rejects_garbage() {
    let service = Arc::new(MockBusService::default());

    let (status, _) = get(app(&service), "/getBusBytime/noonish").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn type_lookup_parses_the_enum_before_delegating() {
    let service = Arc::new(MockBusService::default());

    let (status, _) = get(app(&service), "/busType/NON_AC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(service.calls(), ["busType:NON_AC"]);

    let (status, body) = get(app(&service), "/busType/LUXURY").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body), json!({ "error": "unknown bus type: LUXURY" }));
    assert_eq!(service.calls(), ["busType:NON_AC"]);
}

#[tokio::test]
async fn connected_buses_preserves_service_order() {
    let first_a = fixture_bus("L1", "Morning Hop", "CityA", "CityB");
    let second_a = fixture_bus("L2", "Afternoon Hop", "CityB", "CityC");
    let first_b = fixture_bus("L3", "Late Hop", "CityA", "CityB");
    let second_b = fixture_bus("L4", "Evening Hop", "CityB", "CityC");
    let service = Arc::new(MockBusService {
        journeys: vec![
            ConnectedBuses {
                first_leg: first_a.clone(),
                second_leg: second_a.clone(),
            },
            ConnectedBuses {
                first_leg: first_b.clone(),
                second_leg: second_b.clone(),
            },
        ],
        ..Default::default()
    });

    let (status, body) = get(app(&service), "/connectedBuses/CityA/CityC").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!([
            {
                "first_leg": bus_json(&first_a),
                "second_leg": bus_json(&second_a),
                "transfer_point": "CityB",
            },
            {
                "first_leg": bus_json(&first_b),
                "second_leg": bus_json(&second_b),
                "transfer_point": "CityB",
            },
        ])
    );
    assert_eq!(service.calls(), ["connectedBuses:CityA:CityC"]);
}

#[test]
fn parse_date_handles_iso_dates_only() {
    assert_eq!(
        parse_date("2026-09-01").unwrap(),
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    );
    assert!(parse_date("01-09-2026").is_err());
}

#[test]
fn parse_timestamp_handles_both_separators() {
    let expected: NaiveDateTime = "2026-09-01T08:00:00".parse().unwrap();
    assert_eq!(parse_timestamp("2026-09-01T08:00:00").unwrap(), expected);
    assert_eq!(parse_timestamp("2026-09-01 08:00:00").unwrap(), expected);
    assert!(parse_timestamp("2026-09-01").is_err());
}
