//! Booking notifications
//!
//! Messages are rendered from the booking and handed to a [`Notifier`].
//! Delivery is best effort: failures and timeouts come back as a warning
//! string and never undo the booking change that triggered them.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::email::EmailService;
use crate::{
    config::{EmailConfig, NotificationsConfig},
    models::Booking,
};

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Delivery timed out after {0}s")]
    Timeout(u64),
}

/// What happened to the booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Confirmation,
    Updated,
    Cancelled,
}

impl NoticeKind {
    fn title(&self) -> &'static str {
        match self {
            NoticeKind::Confirmation => "Booking Confirmation",
            NoticeKind::Updated => "Booking Updated",
            NoticeKind::Cancelled => "Booking Cancelled",
        }
    }

    fn lead(&self) -> &'static str {
        match self {
            NoticeKind::Confirmation => "Thank you for your reservation. Your booking details are below.",
            NoticeKind::Updated => "Your booking has been updated. The new details are below.",
            NoticeKind::Cancelled => "Your booking has been cancelled. The cancelled reservation was:",
        }
    }
}

/// Rendered plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn render(kind: NoticeKind, booking: &Booking) -> Self {
        let subject = format!("{} - {}", kind.title(), booking.hotel_name);
        let special_requests = booking
            .special_requests
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("No special requests");

        let body = format!(
            r#"Dear {name},

{lead}

Confirmation number: {confirmation}
Hotel: {hotel}
Rooms: {rooms}
Total price: {total}
Stay type: {stay_type}
Dates: {start} to {end}
Special requests: {special_requests}
"#,
            name = booking.customer.name,
            lead = kind.lead(),
            confirmation = booking.confirmation_number,
            hotel = booking.hotel_name,
            rooms = booking.rooms.describe(),
            total = booking.total_price,
            stay_type = booking.stay_type,
            start = booking.date_range.start_date,
            end = booking.date_range.end_date,
            special_requests = special_requests,
        );

        Self {
            to: booking.customer.email.clone(),
            subject,
            body,
        }
    }
}

/// Message delivery channel
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationError>;
}

/// Notifier that only writes messages to the log
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        tracing::info!(to = %message.to, subject = %message.subject, "Notification (email disabled)");
        tracing::debug!("{}", message.body);
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotificationService {
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl NotificationService {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self { notifier, timeout }
    }

    /// SMTP delivery when email is enabled, log output otherwise
    pub fn from_config(email: &EmailConfig, notifications: &NotificationsConfig) -> Self {
        let timeout = Duration::from_secs(notifications.timeout_secs);
        let notifier: Arc<dyn Notifier> = if email.enabled {
            Arc::new(EmailService::new(email.clone(), timeout))
        } else {
            Arc::new(LogNotifier)
        };
        Self::new(notifier, timeout)
    }

    /// Send a notice about `booking`; returns a warning when delivery failed
    pub async fn notify(&self, kind: NoticeKind, booking: &Booking) -> Option<String> {
        let message = NotificationMessage::render(kind, booking);

        let result = match tokio::time::timeout(self.timeout, self.notifier.deliver(&message)).await {
            Ok(result) => result,
            Err(_) => Err(NotificationError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    "Notification for booking {} could not be delivered: {}",
                    booking.confirmation_number,
                    e
                );
                Some(format!("Notification could not be delivered: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, Customer, Guests, RoomLine, RoomSelection, StayDates, StayType};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn booking(special_requests: Option<&str>) -> Booking {
        let mut rooms = RoomSelection::default();
        rooms.single = RoomLine { count: 2, price_per_room: Decimal::from(100) };
        rooms.double = RoomLine { count: 1, price_per_room: Decimal::from(150) };
        let now = Utc::now();

        Booking {
            id: Uuid::new_v4(),
            hotel_id: Uuid::new_v4(),
            hotel_name: "Seaside Inn".to_string(),
            customer: Customer {
                name: "Ana Silva".to_string(),
                email: "ana@example.com".to_string(),
                phone: "+351 900 000 000".to_string(),
            },
            guests: Guests { adults: 3, children: 0 },
            rooms,
            date_range: StayDates {
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            },
            stay_type: StayType::BedAndBreakfast,
            special_requests: special_requests.map(str::to_string),
            total_price: Decimal::from(1050),
            confirmation_number: "BK-0123ABCD".to_string(),
            status: BookingStatus::Pending,
            low_availability: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_render_confirmation() {
        let message = NotificationMessage::render(NoticeKind::Confirmation, &booking(None));

        assert_eq!(message.to, "ana@example.com");
        assert_eq!(message.subject, "Booking Confirmation - Seaside Inn");
        assert!(message.body.contains("Confirmation number: BK-0123ABCD"));
        assert!(message.body.contains("Rooms: single x 2, double x 1"));
        assert!(message.body.contains("Total price: 1050"));
        assert!(message.body.contains("Stay type: Bed & Breakfast"));
        assert!(message.body.contains("Dates: 2024-07-01 to 2024-07-04"));
        assert!(message.body.contains("Special requests: No special requests"));
    }

    #[test]
    fn test_render_subjects() {
        let b = booking(Some("Late check-in"));
        assert_eq!(
            NotificationMessage::render(NoticeKind::Updated, &b).subject,
            "Booking Updated - Seaside Inn"
        );
        let cancelled = NotificationMessage::render(NoticeKind::Cancelled, &b);
        assert_eq!(cancelled.subject, "Booking Cancelled - Seaside Inn");
        assert!(cancelled.body.contains("Special requests: Late check-in"));
    }

    #[tokio::test]
    async fn test_delivery_failure_becomes_warning() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_deliver()
            .times(1)
            .returning(|_| Err(NotificationError::Delivery("connection refused".to_string())));

        let service = NotificationService::new(Arc::new(notifier), Duration::from_secs(1));
        let warning = service.notify(NoticeKind::Confirmation, &booking(None)).await;
        assert!(warning.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_delivery_success_has_no_warning() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_deliver()
            .withf(|m| m.subject == "Booking Cancelled - Seaside Inn")
            .times(1)
            .returning(|_| Ok(()));

        let service = NotificationService::new(Arc::new(notifier), Duration::from_secs(1));
        assert!(service.notify(NoticeKind::Cancelled, &booking(None)).await.is_none());
    }

    struct SlowNotifier;

    #[async_trait]
    impl Notifier for SlowNotifier {
        async fn deliver(&self, _message: &NotificationMessage) -> Result<(), NotificationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_slow_delivery_times_out() {
        let service = NotificationService::new(Arc::new(SlowNotifier), Duration::from_millis(20));
        let warning = service.notify(NoticeKind::Updated, &booking(None)).await;
        assert!(warning.unwrap().contains("timed out"));
    }
}
