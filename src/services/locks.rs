//! Per-hotel lock registry
//!
//! Mutating operations on one hotel's inventory run one at a time inside
//! this process; different hotels never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct HotelLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl HotelLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a hotel; released when the guard drops
    pub async fn acquire(&self, hotel_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.entry(hotel_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop the lock of a deleted hotel
    pub fn forget(&self, hotel_id: Uuid) {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.remove(&hotel_id);
    }
}
