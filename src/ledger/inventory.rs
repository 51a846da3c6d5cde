//! In-memory inventory ledger for one hotel
//!
//! A [`HotelLedger`] holds the daily availability entries of a single hotel
//! for the days an operation touches. Mutations are applied in memory and
//! the changed entries are handed to the repository in one write, so a
//! failed operation simply drops the ledger.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use super::LedgerError;
use crate::models::{DailyAvailability, DaySnapshot, RoomCounts};

#[derive(Debug, Clone)]
pub struct HotelLedger {
    hotel_id: Uuid,
    baseline: RoomCounts,
    entries: BTreeMap<NaiveDate, DailyAvailability>,
    changed: BTreeSet<NaiveDate>,
}

impl HotelLedger {
    /// Build a ledger from stored entries; entries of other hotels are ignored
    pub fn new(
        hotel_id: Uuid,
        baseline: RoomCounts,
        entries: impl IntoIterator<Item = DailyAvailability>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| e.hotel_id == hotel_id)
            .map(|e| (e.date, e))
            .collect();

        Self {
            hotel_id,
            baseline,
            entries,
            changed: BTreeSet::new(),
        }
    }

    pub fn hotel_id(&self) -> Uuid {
        self.hotel_id
    }

    pub fn baseline(&self) -> &RoomCounts {
        &self.baseline
    }

    /// Remaining rooms for a day; days without an entry read as the baseline
    pub fn remaining(&self, day: NaiveDate) -> RoomCounts {
        self.entries
            .get(&day)
            .map(|e| e.remaining)
            .unwrap_or(self.baseline)
    }

    /// Create baseline entries for days not yet present.
    ///
    /// Returns how many entries were created; a second call on the same
    /// days creates none.
    pub fn ensure_initialized(&mut self, days: &[NaiveDate]) -> usize {
        let mut created = 0;
        for day in days {
            if !self.entries.contains_key(day) {
                self.entries.insert(
                    *day,
                    DailyAvailability::from_baseline(self.hotel_id, *day, self.baseline),
                );
                self.changed.insert(*day);
                created += 1;
            }
        }
        created
    }

    /// Verify every day can serve `requested`, reporting the first shortfall.
    ///
    /// Days are checked in the order given, room types in their stable order.
    pub fn check_availability(
        &self,
        days: &[NaiveDate],
        requested: &RoomCounts,
    ) -> Result<(), LedgerError> {
        for day in days {
            let remaining = self.remaining(*day);
            for (room_type, wanted) in requested.iter() {
                if wanted <= 0 {
                    continue;
                }
                let available = remaining.get(room_type);
                if available < wanted {
                    return Err(LedgerError::InsufficientInventory {
                        date: *day,
                        room_type,
                        available,
                        requested: wanted,
                    });
                }
            }
        }
        Ok(())
    }

    /// Subtract `counts` on every day, or on none of them.
    pub fn deduct(&mut self, days: &[NaiveDate], counts: &RoomCounts) -> Result<(), LedgerError> {
        for day in days {
            let remaining = self.remaining(*day);
            for (room_type, n) in counts.iter() {
                if n > 0 && remaining.get(room_type) - n < 0 {
                    return Err(LedgerError::Overbooking {
                        date: *day,
                        room_type,
                    });
                }
            }
        }

        for day in days {
            let entry = self.entry_mut(*day);
            for (room_type, n) in counts.iter() {
                if n > 0 {
                    let left = entry.remaining.get(room_type) - n;
                    entry.remaining.set(room_type, left);
                }
            }
            self.changed.insert(*day);
        }
        Ok(())
    }

    /// Give `counts` back on every day, never exceeding the baseline
    pub fn restore(&mut self, days: &[NaiveDate], counts: &RoomCounts) {
        let baseline = self.baseline;
        for day in days {
            let entry = self.entry_mut(*day);
            for (room_type, n) in counts.iter() {
                if n > 0 {
                    let restored = (entry.remaining.get(room_type) + n).min(baseline.get(room_type));
                    entry.remaining.set(room_type, restored);
                }
            }
            self.changed.insert(*day);
        }
    }

    /// True when any booked room type is at or below `threshold` on one of the days
    pub fn is_low(&self, days: &[NaiveDate], booked: &RoomCounts, threshold: i32) -> bool {
        days.iter().any(|day| {
            let remaining = self.remaining(*day);
            booked
                .iter()
                .any(|(room_type, n)| n > 0 && remaining.get(room_type) <= threshold)
        })
    }

    /// Per-day view of the given days
    pub fn snapshot(&self, days: impl IntoIterator<Item = NaiveDate>) -> Vec<DaySnapshot> {
        days.into_iter()
            .map(|date| DaySnapshot {
                date,
                rooms: self.remaining(date),
            })
            .collect()
    }

    /// Entries created or modified since the ledger was loaded
    pub fn changed_entries(&self) -> Vec<DailyAvailability> {
        self.changed
            .iter()
            .filter_map(|day| self.entries.get(day).cloned())
            .collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    fn entry_mut(&mut self, day: NaiveDate) -> &mut DailyAvailability {
        let hotel_id = self.hotel_id;
        let baseline = self.baseline;
        self.entries
            .entry(day)
            .or_insert_with(|| DailyAvailability::from_baseline(hotel_id, day, baseline))
    }
}
