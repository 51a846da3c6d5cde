//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, hotels};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Booking API",
        version = "0.3.0",
        description = "Hotel room inventory and reservation REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Hotels
        hotels::create_hotel,
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::update_hotel,
        hotels::delete_hotel,
        hotels::get_availability,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::get_booking_by_confirmation,
        bookings::update_booking,
        bookings::cancel_booking,
        bookings::toggle_booking_status,
        bookings::set_booking_status,
    ),
    components(
        schemas(
            // Hotels
            crate::models::Hotel,
            crate::models::hotel::CreateHotel,
            crate::models::hotel::UpdateHotel,
            crate::models::RoomCounts,
            crate::models::DaySnapshot,
            crate::models::StayType,
            // Bookings
            crate::models::Booking,
            crate::models::BookingDetails,
            crate::models::CreateBooking,
            crate::models::Customer,
            crate::models::Guests,
            crate::models::StayDates,
            crate::models::RoomLine,
            crate::models::RoomSelection,
            crate::models::RoomType,
            crate::models::BookingStatus,
            crate::models::booking::RoomLineRequest,
            crate::models::booking::UpdateStatus,
            bookings::BookingResponse,
            bookings::CancelResponse,
            bookings::StatusResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::InventoryErrorDetails,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "hotels", description = "Hotels and their room inventory"),
        (name = "bookings", description = "Reservations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
