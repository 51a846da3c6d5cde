//! Error types for the booking server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::{ledger::LedgerError, models::RoomType};

/// Machine-readable error codes returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    NotFound = 3,
    BadValue = 4,
    InvalidDateRange = 5,
    InsufficientInventory = 6,
    Overbooking = 7,
    Conflict = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date range: {end} is before {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Not enough {room_type} rooms on {date}: {available} available, {requested} requested")]
    InsufficientInventory {
        date: NaiveDate,
        room_type: RoomType,
        available: i32,
        requested: i32,
    },

    #[error("Booking would overbook {room_type} rooms on {date}")]
    Overbooking { date: NaiveDate, room_type: RoomType },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn hotel_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("Hotel with id {} not found", id))
    }

    pub fn booking_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("Booking {} not found", id))
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidRange { start, end } => AppError::InvalidRange { start, end },
            LedgerError::InsufficientInventory { date, room_type, available, requested } => {
                AppError::InsufficientInventory { date, room_type, available, requested }
            }
            LedgerError::Overbooking { date, room_type } => AppError::Overbooking { date, room_type },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Offending day and room type of an inventory error
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryErrorDetails {
    pub date: NaiveDate,
    pub room_type: RoomType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<i32>,
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<InventoryErrorDetails>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code, message, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg, None),
            AppError::InvalidRange { .. } => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidDateRange, message, None)
            }
            AppError::InsufficientInventory { date, room_type, available, requested } => (
                StatusCode::CONFLICT,
                ErrorCode::InsufficientInventory,
                message,
                Some(InventoryErrorDetails {
                    date,
                    room_type,
                    available: Some(available),
                    requested: Some(requested),
                }),
            ),
            AppError::Overbooking { date, room_type } => (
                StatusCode::CONFLICT,
                ErrorCode::Overbooking,
                message,
                Some(InventoryErrorDetails {
                    date,
                    room_type,
                    available: None,
                    requested: None,
                }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg, None),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
