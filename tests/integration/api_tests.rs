//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to register a throwaway hotel
async fn create_hotel(client: &Client, singles: i32) -> String {
    let response = client
        .post(format!("{}/hotels", BASE_URL))
        .json(&json!({
            "hotelName": "Live Test Hotel",
            "email": format!("live-{}@hotel.example", uuid::Uuid::new_v4().simple()),
            "location": "Braga",
            "roomDetails": { "single": singles },
            "stayTypes": ["Room Only"]
        }))
        .send()
        .await
        .expect("Failed to send hotel request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse hotel response");
    body["id"].as_str().expect("No id in response").to_string()
}

fn booking(hotel_id: &str, count: i32) -> Value {
    json!({
        "hotelId": hotel_id,
        "customer": { "name": "Live Tester", "email": "tester@example.com", "phone": "000" },
        "rooms": [{ "roomType": "single", "roomCount": count, "pricePerRoom": "75" }],
        "dateRange": { "startDate": "2031-01-10", "endDate": "2031-01-12" },
        "stayType": "Room Only"
    })
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_and_cancel_booking() {
    let client = Client::new();
    let hotel_id = create_hotel(&client, 1).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking(&hotel_id, 1))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["booking"]["id"].as_str().expect("No booking id").to_string();
    assert_eq!(body["booking"]["totalPrice"], "150");

    let response = client
        .delete(format!("{}/bookings/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "cancelled");

    let response = client
        .delete(format!("{}/hotels/{}", BASE_URL, hotel_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_overbooking_conflict() {
    let client = Client::new();
    let hotel_id = create_hotel(&client, 1).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking(&hotel_id, 2))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "InsufficientInventory");
}

#[tokio::test]
#[ignore]
async fn test_unknown_booking() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
