//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        booking::{BookingQuery, UpdateStatus},
        Booking, BookingDetails, BookingStatus, CreateBooking,
    },
    services::bookings::BookingOutcome,
};

/// Booking after a create or update
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub booking: Booking,
    /// Set when the notification could not be delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<BookingOutcome> for BookingResponse {
    fn from(outcome: BookingOutcome) -> Self {
        Self {
            booking: outcome.booking,
            warning: outcome.warning,
        }
    }
}

/// Cancelled booking snapshot
#[derive(Serialize, ToSchema)]
pub struct CancelResponse {
    /// Always "cancelled"
    pub status: String,
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// New status after a toggle
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub id: Uuid,
    pub status: BookingStatus,
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Not enough rooms or concurrent change", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let outcome = state.services.bookings.create(request).await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// List bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("hotel_id" = Option<Uuid>, Query, description = "Filter by hotel"),
        ("status" = Option<BookingStatus>, Query, description = "Filter by status"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Bookings per page (default: 20)")
    ),
    responses(
        (status = 200, description = "Bookings ordered by start date", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.list(&query).await?;
    Ok(Json(bookings))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Get booking by confirmation number
#[utoipa::path(
    get,
    path = "/bookings/confirmation/{number}",
    tag = "bookings",
    params(
        ("number" = String, Path, description = "Confirmation number")
    ),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking_by_confirmation(
    State(state): State<crate::AppState>,
    Path(number): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get_by_confirmation(&number).await?;
    Ok(Json(booking))
}

/// Change rooms, dates or guest details of a booking
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = BookingDetails,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Not enough rooms; the booking is unchanged", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(details): Json<BookingDetails>,
) -> AppResult<Json<BookingResponse>> {
    let outcome = state.services.bookings.update(id, details).await?;
    Ok(Json(outcome.into()))
}

/// Cancel a booking and release its rooms
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = CancelResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CancelResponse>> {
    let outcome = state.services.bookings.cancel(id).await?;
    Ok(Json(CancelResponse {
        status: BookingStatus::Cancelled.to_string(),
        booking: outcome.booking,
        warning: outcome.warning,
    }))
}

/// Switch between pending and confirmed
#[utoipa::path(
    put,
    path = "/bookings/{id}/toggle-status",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Status switched", body = StatusResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn toggle_booking_status(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StatusResponse>> {
    let booking = state.services.bookings.toggle_status(id).await?;
    Ok(Json(StatusResponse {
        id: booking.id,
        status: booking.status,
    }))
}

/// Set booking status
#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status updated", body = Booking),
        (status = 400, description = "Use DELETE to cancel", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_booking_status(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatus>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.set_status(id, request.status).await?;
    Ok(Json(booking))
}
