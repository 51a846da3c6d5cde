//! Business logic services

pub mod bookings;
pub mod email;
pub mod hotels;
pub mod inventory;
pub mod locks;
pub mod notifications;

use crate::{config::AppConfig, repository::DynRepository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub hotels: hotels::HotelsService,
    pub inventory: inventory::InventoryService,
    pub bookings: bookings::BookingsService,
    pub notifications: notifications::NotificationService,
}

impl Services {
    /// Create all services, delivering notifications as configured
    pub fn new(repository: DynRepository, config: &AppConfig) -> Self {
        let notifications =
            notifications::NotificationService::from_config(&config.email, &config.notifications);
        Self::with_notifications(repository, config, notifications)
    }

    /// Create all services around an explicit notification channel
    pub fn with_notifications(
        repository: DynRepository,
        config: &AppConfig,
        notifications: notifications::NotificationService,
    ) -> Self {
        let locks = locks::HotelLocks::new();
        let inventory =
            inventory::InventoryService::new(repository.clone(), locks.clone(), config.booking.clone());

        Self {
            hotels: hotels::HotelsService::new(repository.clone(), locks.clone()),
            bookings: bookings::BookingsService::new(
                repository,
                inventory.clone(),
                locks,
                notifications.clone(),
                config.booking.clone(),
            ),
            inventory,
            notifications,
        }
    }
}
