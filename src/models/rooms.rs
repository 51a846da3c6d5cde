//! Per-room-type records: capacities, remaining counts and priced selections

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::RoomType;

/// Largest count accepted for one room type, in a hotel or a booking
pub const MAX_ROOMS_PER_TYPE: i32 = 100_000;

/// One integer per room type.
///
/// Used for hotel baselines, daily remaining counts and requested counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoomCounts {
    #[serde(default)]
    pub single: i32,
    #[serde(default)]
    pub double: i32,
    #[serde(default)]
    pub triple: i32,
    #[serde(default)]
    pub family: i32,
    #[serde(default)]
    pub suite: i32,
}

impl RoomCounts {
    pub fn get(&self, room_type: RoomType) -> i32 {
        match room_type {
            RoomType::Single => self.single,
            RoomType::Double => self.double,
            RoomType::Triple => self.triple,
            RoomType::Family => self.family,
            RoomType::Suite => self.suite,
        }
    }

    pub fn set(&mut self, room_type: RoomType, value: i32) {
        match room_type {
            RoomType::Single => self.single = value,
            RoomType::Double => self.double = value,
            RoomType::Triple => self.triple = value,
            RoomType::Family => self.family = value,
            RoomType::Suite => self.suite = value,
        }
    }

    /// Iterate `(type, count)` in stable room-type order
    pub fn iter(&self) -> impl Iterator<Item = (RoomType, i32)> + '_ {
        RoomType::ALL.iter().map(move |t| (*t, self.get(*t)))
    }

    pub fn total(&self) -> i64 {
        self.iter().map(|(_, n)| i64::from(n)).sum()
    }

    pub fn any(&self) -> bool {
        self.iter().any(|(_, n)| n > 0)
    }

    /// First room type holding a negative value, if any
    pub fn first_negative(&self) -> Option<RoomType> {
        self.iter().find(|(_, n)| *n < 0).map(|(t, _)| t)
    }

    /// First room type above [`MAX_ROOMS_PER_TYPE`], if any
    pub fn first_oversized(&self) -> Option<RoomType> {
        self.iter().find(|(_, n)| *n > MAX_ROOMS_PER_TYPE).map(|(t, _)| t)
    }
}

/// Count and unit price for one room type in a booking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomLine {
    pub count: i32,
    #[schema(value_type = String)]
    pub price_per_room: Decimal,
}

/// Room selection snapshot owned by a booking, one line per room type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoomSelection {
    #[serde(default)]
    pub single: RoomLine,
    #[serde(default)]
    pub double: RoomLine,
    #[serde(default)]
    pub triple: RoomLine,
    #[serde(default)]
    pub family: RoomLine,
    #[serde(default)]
    pub suite: RoomLine,
}

impl RoomSelection {
    pub fn line(&self, room_type: RoomType) -> &RoomLine {
        match room_type {
            RoomType::Single => &self.single,
            RoomType::Double => &self.double,
            RoomType::Triple => &self.triple,
            RoomType::Family => &self.family,
            RoomType::Suite => &self.suite,
        }
    }

    pub fn line_mut(&mut self, room_type: RoomType) -> &mut RoomLine {
        match room_type {
            RoomType::Single => &mut self.single,
            RoomType::Double => &mut self.double,
            RoomType::Triple => &mut self.triple,
            RoomType::Family => &mut self.family,
            RoomType::Suite => &mut self.suite,
        }
    }

    /// Iterate lines in stable room-type order
    pub fn iter(&self) -> impl Iterator<Item = (RoomType, &RoomLine)> + '_ {
        RoomType::ALL.iter().map(move |t| (*t, self.line(*t)))
    }

    /// Requested room counts, without prices
    pub fn counts(&self) -> RoomCounts {
        let mut counts = RoomCounts::default();
        for (room_type, line) in self.iter() {
            counts.set(room_type, line.count);
        }
        counts
    }

    /// Human readable `type x count` list of the booked lines
    pub fn describe(&self) -> String {
        self.iter()
            .filter(|(_, line)| line.count > 0)
            .map(|(t, line)| format!("{} x {}", t, line.count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
