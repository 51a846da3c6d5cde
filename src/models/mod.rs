//! Data models for the booking server

pub mod availability;
pub mod booking;
pub mod enums;
pub mod hotel;
pub mod rooms;

// Re-export commonly used types
pub use availability::{DailyAvailability, DaySnapshot};
pub use booking::{Booking, BookingDetails, CreateBooking, Customer, Guests, StayDates};
pub use enums::{BookingStatus, RoomType, StayType};
pub use hotel::Hotel;
pub use rooms::{RoomCounts, RoomLine, RoomSelection};
