//! HTTP round trips through the router, backed by in-memory storage

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use hotel_booking_server::{
    api,
    config::AppConfig,
    repository::MemoryRepository,
    services::Services,
    AppState,
};

fn app() -> Router {
    let config = AppConfig::default();
    let services = Services::new(Arc::new(MemoryRepository::new()), &config);
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_hotel(app: &Router, singles: i32) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/hotels",
        Some(json!({
            "hotelName": "Casa do Rio",
            "email": "reservas@casadorio.example",
            "location": "Porto",
            "roomDetails": { "single": singles, "double": 2 },
            "stayTypes": ["Room Only", "Bed & Breakfast"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["totalRooms"], singles + 2);
    body["id"].as_str().unwrap().to_string()
}

fn booking_body(hotel_id: &str, rooms: Value, start: &str, end: &str) -> Value {
    json!({
        "hotelId": hotel_id,
        "customer": { "name": "Joana Matos", "email": "joana@example.com", "phone": "+351 910 000 000" },
        "guests": { "adults": 2, "children": 0 },
        "rooms": rooms,
        "dateRange": { "startDate": start, "endDate": end },
        "stayType": "Bed & Breakfast",
        "specialRequests": "High floor"
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let app = app();
    let hotel_id = create_hotel(&app, 2).await;

    let rooms = json!([
        { "roomType": "singleRoom", "roomCount": 2, "pricePerRoom": "100" },
        { "roomType": "double", "roomCount": 1, "pricePerRoom": "150" }
    ]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(&hotel_id, rooms, "2025-06-01", "2025-06-04")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("warning").is_none());
    let booking = &body["booking"];
    assert_eq!(booking["totalPrice"], "1050");
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["rooms"]["single"]["count"], 2);
    let id = booking["id"].as_str().unwrap().to_string();
    let confirmation = booking["confirmationNumber"].as_str().unwrap().to_string();

    let (status, days) = send(
        &app,
        "GET",
        &format!("/api/v1/hotels/{}/availability?start_date=2025-06-01&end_date=2025-06-05", hotel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0]["date"], "2025-06-01");
    assert_eq!(days[0]["single"], 0);
    assert_eq!(days[3]["double"], 1);
    assert_eq!(days[4]["single"], 2);

    let (status, found) = send(&app, "GET", &format!("/api/v1/bookings/confirmation/{}", confirmation), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], id.as_str());

    let (status, toggled) = send(&app, "PUT", &format!("/api/v1/bookings/{}/toggle-status", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled, json!({ "id": id, "status": "confirmed" }));

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/api/v1/bookings?hotel_id={}&status=confirmed", hotel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, cancelled) = send(&app, "DELETE", &format!("/api/v1/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["booking"]["status"], "cancelled");

    let (status, _) = send(&app, "GET", &format!("/api/v1/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/hotels/{}", hotel_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_insufficient_inventory_response() {
    let app = app();
    let hotel_id = create_hotel(&app, 1).await;
    let rooms = json!([{ "roomType": "single", "roomCount": 2, "pricePerRoom": "80" }]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(&hotel_id, rooms, "2025-07-10", "2025-07-12")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "InsufficientInventory");
    assert_eq!(body["details"]["date"], "2025-07-10");
    assert_eq!(body["details"]["roomType"], "single");
    assert_eq!(body["details"]["available"], 1);
    assert_eq!(body["details"]["requested"], 2);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app();
    let hotel_id = create_hotel(&app, 1).await;

    let rooms = json!([
        { "roomType": "penthouse", "roomCount": 1, "pricePerRoom": "80" },
        { "roomType": "loft", "roomCount": 1, "pricePerRoom": "80" }
    ]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(&hotel_id, rooms, "2025-07-10", "2025-07-12")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("penthouse, loft"));

    let rooms = json!([{ "roomType": "single", "roomCount": 1, "pricePerRoom": "80" }]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(&hotel_id, rooms, "2025-07-12", "2025-07-10")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidDateRange");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/hotels/{}/availability?start_date=2025-07-12&end_date=2025-07-10", hotel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_ids() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/api/v1/hotels/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");

    let (status, _) = send(&app, "PUT", &format!("/api/v1/bookings/{}/toggle-status", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hotel_with_bookings_cannot_be_deleted() {
    let app = app();
    let hotel_id = create_hotel(&app, 1).await;
    let rooms = json!([{ "roomType": "single", "roomCount": 1, "pricePerRoom": "80" }]);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(&hotel_id, rooms, "2025-08-01", "2025-08-02")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/hotels/{}", hotel_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn test_out_of_range_input_is_a_bad_request() {
    let app = app();
    let hotel_id = create_hotel(&app, 1).await;

    let rooms = json!([{ "roomType": "single", "roomCount": 2, "pricePerRoom": "50000000000000000000000000000" }]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(&hotel_id, rooms, "2025-09-01", "2025-09-02")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("cannot exceed"));

    let (status, _) = send(&app, "GET", "/api/v1/bookings?page=9223372036854775807", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_responses_are_compressed_on_request() {
    let app = app();
    create_hotel(&app, 1).await;

    let request = Request::builder()
        .uri("/api/v1/hotels")
        .header("accept-encoding", "gzip")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-encoding"], "gzip");
}
