//! Booking price calculation

use rust_decimal::Decimal;

use crate::models::RoomSelection;

/// Decimal places kept for amounts
pub const PRICE_SCALE: u32 = 2;

/// Largest unit price a room line may carry (`NUMERIC(12, 2)`)
pub const MAX_PRICE_PER_ROOM: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Largest booking total that can be stored (`NUMERIC(14, 2)`)
pub const MAX_TOTAL_PRICE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Price of one night for the whole selection, `None` on overflow
pub fn nightly_rate(rooms: &RoomSelection) -> Option<Decimal> {
    rooms.iter().try_fold(Decimal::ZERO, |sum, (_, line)| {
        Decimal::from(line.count)
            .checked_mul(line.price_per_room)
            .and_then(|amount| sum.checked_add(amount))
    })
}

/// `Σ(count × pricePerRoom) × nights`, `None` on overflow
pub fn total_price(rooms: &RoomSelection, nights: i64) -> Option<Decimal> {
    nightly_rate(rooms)?.checked_mul(Decimal::from(nights.max(0)))
}
