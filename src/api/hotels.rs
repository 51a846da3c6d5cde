//! Hotel management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        availability::AvailabilityQuery,
        hotel::{CreateHotel, HotelQuery, UpdateHotel},
        DaySnapshot, Hotel,
    },
};

/// Register a hotel
#[utoipa::path(
    post,
    path = "/hotels",
    tag = "hotels",
    request_body = CreateHotel,
    responses(
        (status = 201, description = "Hotel created", body = Hotel),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_hotel(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateHotel>,
) -> AppResult<(StatusCode, Json<Hotel>)> {
    let hotel = state.services.hotels.create(request).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// List hotels
#[utoipa::path(
    get,
    path = "/hotels",
    tag = "hotels",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Hotels per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of hotels", body = Vec<Hotel>)
    )
)]
pub async fn list_hotels(
    State(state): State<crate::AppState>,
    Query(query): Query<HotelQuery>,
) -> AppResult<Json<Vec<Hotel>>> {
    let hotels = state.services.hotels.list(&query).await?;
    Ok(Json(hotels))
}

/// Get hotel details by ID
#[utoipa::path(
    get,
    path = "/hotels/{id}",
    tag = "hotels",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel details", body = Hotel),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_hotel(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Hotel>> {
    let hotel = state.services.hotels.get(id).await?;
    Ok(Json(hotel))
}

/// Update descriptive hotel fields
#[utoipa::path(
    put,
    path = "/hotels/{id}",
    tag = "hotels",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    request_body = UpdateHotel,
    responses(
        (status = 200, description = "Hotel updated", body = Hotel),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_hotel(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateHotel>,
) -> AppResult<Json<Hotel>> {
    let hotel = state.services.hotels.update(id, request).await?;
    Ok(Json(hotel))
}

/// Delete a hotel without bookings
#[utoipa::path(
    delete,
    path = "/hotels/{id}",
    tag = "hotels",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Hotel still has bookings", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_hotel(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.hotels.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remaining rooms per day
#[utoipa::path(
    get,
    path = "/hotels/{id}/availability",
    tag = "hotels",
    params(
        ("id" = Uuid, Path, description = "Hotel ID"),
        ("start_date" = String, Query, description = "First day (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Last day, inclusive (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Availability per day", body = Vec<DaySnapshot>),
        (status = 400, description = "Invalid date range", body = crate::error::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<DaySnapshot>>> {
    let days = state
        .services
        .inventory
        .snapshot(id, query.start_date, query.end_date)
        .await?;
    Ok(Json(days))
}
