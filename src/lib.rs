//! Hotel Booking Server
//!
//! Room inventory and reservations for a set of hotels: a per-day ledger
//! that never lets a date show more rooms booked than exist, the booking
//! transactions built on it, and a REST JSON API around both.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
