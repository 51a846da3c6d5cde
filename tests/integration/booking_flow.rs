//! Booking flows against the in-memory backend

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use hotel_booking_server::{
    config::AppConfig,
    error::AppError,
    models::{
        booking::RoomLineRequest,
        hotel::CreateHotel,
        BookingDetails, CreateBooking, Customer, Guests, RoomCounts, RoomType, StayDates, StayType,
    },
    repository::{DynRepository, MemoryRepository, Repository},
    services::{
        notifications::{LogNotifier, NotificationError, NotificationMessage, NotificationService, Notifier},
        Services,
    },
};

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn deliver(&self, _message: &NotificationMessage) -> Result<(), NotificationError> {
        Err(NotificationError::Delivery("mail relay unavailable".to_string()))
    }
}

fn services_with(repository: DynRepository, notifier: Arc<dyn Notifier>) -> Services {
    let notifications = NotificationService::new(notifier, Duration::from_secs(1));
    Services::with_notifications(repository, &AppConfig::default(), notifications)
}

fn services() -> (Services, DynRepository) {
    let repository: DynRepository = Arc::new(MemoryRepository::new());
    (services_with(repository.clone(), Arc::new(LogNotifier)), repository)
}

async fn hotel(services: &Services, baseline: RoomCounts) -> Uuid {
    services
        .hotels
        .create(CreateHotel {
            hotel_name: "Alfama Suites".to_string(),
            email: format!("{}@alfama.example", Uuid::new_v4().simple()),
            location: "Lisbon".to_string(),
            room_details: baseline,
            stay_types: vec![StayType::BedAndBreakfast],
        })
        .await
        .unwrap()
        .id
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn details(rooms: &[(&str, i32)], start: u32, end: u32) -> BookingDetails {
    BookingDetails {
        customer: Customer {
            name: "Marta Reis".to_string(),
            email: "marta@example.com".to_string(),
            phone: "+351 912 345 678".to_string(),
        },
        guests: Guests { adults: 2, children: 0 },
        rooms: rooms
            .iter()
            .map(|(room_type, count)| RoomLineRequest {
                room_type: room_type.to_string(),
                room_count: *count,
                price_per_room: Decimal::from(90),
            })
            .collect(),
        date_range: StayDates { start_date: date(start), end_date: date(end) },
        stay_type: StayType::BedAndBreakfast,
        special_requests: Some("Quiet room".to_string()),
    }
}

fn booking(hotel_id: Uuid, rooms: &[(&str, i32)], start: u32, end: u32) -> CreateBooking {
    CreateBooking { hotel_id, details: details(rooms, start, end) }
}

async fn remaining(services: &Services, hotel_id: Uuid, start: u32, end: u32) -> Vec<RoomCounts> {
    services
        .inventory
        .snapshot(hotel_id, date(start), date(end))
        .await
        .unwrap()
        .into_iter()
        .map(|day| day.rooms)
        .collect()
}

#[tokio::test]
async fn test_overbooking_rejected() {
    let (services, _) = services();
    let hotel_id = hotel(&services, RoomCounts { single: 1, ..RoomCounts::default() }).await;

    services.bookings.create(booking(hotel_id, &[("single", 1)], 1, 3)).await.unwrap();
    let err = services
        .bookings
        .create(booking(hotel_id, &[("single", 1)], 2, 4))
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientInventory { date: day, room_type, available, requested } => {
            assert_eq!(day, date(2));
            assert_eq!(room_type, RoomType::Single);
            assert_eq!(available, 0);
            assert_eq!(requested, 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let days = remaining(&services, hotel_id, 1, 4).await;
    assert!(days[..3].iter().all(|d| d.single == 0));
    assert_eq!(days[3].single, 1);
}

#[tokio::test]
async fn test_create_then_cancel_restores_every_day() {
    let (services, _) = services();
    let baseline = RoomCounts { single: 2, double: 3, family: 1, ..RoomCounts::default() };
    let hotel_id = hotel(&services, baseline).await;

    let before = remaining(&services, hotel_id, 1, 10).await;
    let created = services
        .bookings
        .create(booking(hotel_id, &[("single", 2), ("double", 1), ("family", 1)], 3, 7))
        .await
        .unwrap()
        .booking;
    assert!(remaining(&services, hotel_id, 3, 7).await.iter().all(|d| d.single == 0 && d.family == 0));

    services.bookings.cancel(created.id).await.unwrap();
    assert_eq!(remaining(&services, hotel_id, 1, 10).await, before);
}

#[tokio::test]
async fn test_all_or_nothing_over_five_nights() {
    let (services, _) = services();
    let hotel_id = hotel(&services, RoomCounts { double: 1, ..RoomCounts::default() }).await;

    // day 3 is already sold out
    let counts = RoomCounts { double: 1, ..RoomCounts::default() };
    services.inventory.deduct(hotel_id, &[date(3)], &counts).await.unwrap();

    let err = services
        .bookings
        .create(booking(hotel_id, &[("double", 1)], 1, 6))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientInventory { .. }));

    let days = remaining(&services, hotel_id, 1, 6).await;
    for (i, day) in days.iter().enumerate() {
        let expected = if i == 2 { 0 } else { 1 };
        assert_eq!(day.double, expected, "day {}", i + 1);
    }
}

#[tokio::test]
async fn test_update_moves_between_ranges_and_types() {
    let (services, _) = services();
    let hotel_id = hotel(&services, RoomCounts { single: 2, suite: 2, ..RoomCounts::default() }).await;

    let created = services
        .bookings
        .create(booking(hotel_id, &[("single", 2)], 1, 4))
        .await
        .unwrap()
        .booking;
    services
        .bookings
        .update(created.id, details(&[("suite", 1)], 10, 13))
        .await
        .unwrap();

    assert!(remaining(&services, hotel_id, 1, 4).await.iter().all(|d| d.single == 2 && d.suite == 2));
    assert!(remaining(&services, hotel_id, 10, 13).await.iter().all(|d| d.single == 2 && d.suite == 1));
}

#[tokio::test]
async fn test_failed_update_keeps_original_reservation() {
    let (services, _) = services();
    let hotel_id = hotel(&services, RoomCounts { single: 1, triple: 1, ..RoomCounts::default() }).await;

    let original = services
        .bookings
        .create(booking(hotel_id, &[("single", 1)], 1, 2))
        .await
        .unwrap()
        .booking;
    services
        .bookings
        .create(booking(hotel_id, &[("triple", 1)], 5, 6))
        .await
        .unwrap();

    let err = services
        .bookings
        .update(original.id, details(&[("triple", 1)], 5, 6))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientInventory { .. }));

    let stored = services.bookings.get(original.id).await.unwrap();
    assert_eq!(stored, original);
    assert!(remaining(&services, hotel_id, 1, 2).await.iter().all(|d| d.single == 0));
}

#[tokio::test]
async fn test_conservation_after_mixed_operations() {
    let (services, _) = services();
    let baseline = RoomCounts { single: 4, double: 4, triple: 2, ..RoomCounts::default() };
    let hotel_id = hotel(&services, baseline).await;

    let a = services.bookings.create(booking(hotel_id, &[("single", 2)], 1, 5)).await.unwrap().booking;
    let b = services
        .bookings
        .create(booking(hotel_id, &[("double", 3), ("triple", 1)], 3, 8))
        .await
        .unwrap()
        .booking;
    services.bookings.create(booking(hotel_id, &[("single", 1), ("triple", 1)], 4, 9)).await.unwrap();
    services.bookings.update(a.id, details(&[("single", 1), ("double", 1)], 2, 6)).await.unwrap();
    services.bookings.cancel(b.id).await.unwrap();

    let active = services.bookings.list(&Default::default()).await.unwrap();
    assert_eq!(active.len(), 2);

    let days = remaining(&services, hotel_id, 1, 10).await;
    for (i, day) in days.iter().enumerate() {
        let today = date(i as u32 + 1);
        for room_type in RoomType::ALL {
            let booked: i32 = active
                .iter()
                .filter(|bk| bk.date_range.start_date <= today && today <= bk.date_range.end_date)
                .map(|bk| bk.rooms.line(room_type).count)
                .sum();
            assert_eq!(
                baseline.get(room_type) - day.get(room_type),
                booked,
                "{} on {}",
                room_type,
                today
            );
        }
    }
}

#[tokio::test]
async fn test_concurrent_creates_never_oversell() {
    let (services, _) = services();
    let hotel_id = hotel(&services, RoomCounts { family: 3, ..RoomCounts::default() }).await;

    let tasks: Vec<_> = (0..12)
        .map(|_| {
            let services = services.clone();
            tokio::spawn(async move {
                services
                    .bookings
                    .create(booking(hotel_id, &[("family", 1)], 14, 16))
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(AppError::InsufficientInventory { .. }) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(succeeded, 3);
    assert!(remaining(&services, hotel_id, 14, 16).await.iter().all(|d| d.family == 0));
}

#[tokio::test]
async fn test_notification_failure_is_a_warning() {
    let repository: DynRepository = Arc::new(MemoryRepository::new());
    let services = services_with(repository, Arc::new(FailingNotifier));
    let hotel_id = hotel(&services, RoomCounts { single: 1, ..RoomCounts::default() }).await;

    let outcome = services
        .bookings
        .create(booking(hotel_id, &[("single", 1)], 1, 2))
        .await
        .unwrap();

    assert!(outcome.warning.unwrap().contains("mail relay unavailable"));
    let stored = services
        .bookings
        .get_by_confirmation(&outcome.booking.confirmation_number)
        .await
        .unwrap();
    assert_eq!(stored.id, outcome.booking.id);

    let cancelled = services.bookings.cancel(stored.id).await.unwrap();
    assert!(cancelled.warning.is_some());
    assert_eq!(remaining(&services, hotel_id, 1, 2).await[0].single, 1);
}

#[tokio::test]
async fn test_stale_availability_write_is_rejected() {
    let (services, repository) = services();
    let hotel_id = hotel(&services, RoomCounts { double: 2, ..RoomCounts::default() }).await;

    services.bookings.create(booking(hotel_id, &[("double", 1)], 1, 2)).await.unwrap();
    let stale = repository.availability_get(hotel_id, date(1), date(2)).await.unwrap();
    assert_eq!(stale.len(), 2);

    // another writer gets in first
    services.bookings.create(booking(hotel_id, &[("double", 1)], 1, 2)).await.unwrap();

    let mut overwrite = stale.clone();
    for entry in &mut overwrite {
        entry.remaining.double = 2;
    }
    let err = repository.availability_save(&overwrite).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(remaining(&services, hotel_id, 1, 2).await.iter().all(|d| d.double == 0));
}
