//! Calendar-day ranges
//!
//! Stays are expressed as timezone-naive dates. The inventory is keyed by
//! every day of the inclusive range, while pricing counts nights.

use chrono::NaiveDate;

use super::LedgerError;

/// Validated `start..=end` pair of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if end < start {
            return Err(LedgerError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Day keys from start to end, inclusive
    pub fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }

    /// Number of day keys covered
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Smallest range covering both
    pub fn union(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Lazy iterator over the days of a [`DateRange`].
///
/// Cloning restarts from the clone point, so a range can be walked as many
/// times as needed.
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        if current > self.end {
            self.next = None;
            return None;
        }
        self.next = current.succ_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) if next <= self.end => {
                let n = (self.end - next).num_days() as usize + 1;
                (n, Some(n))
            }
            _ => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for Days {}

/// Expand `start..=end` into day keys
pub fn expand(start: NaiveDate, end: NaiveDate) -> Result<Days, LedgerError> {
    DateRange::new(start, end).map(|range| range.days())
}

/// Whole nights between two dates; a same-day range has zero nights
pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expand_is_inclusive() {
        let days: Vec<NaiveDate> = expand(date(2024, 3, 1), date(2024, 3, 4)).unwrap().collect();
        assert_eq!(
            days,
            vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3), date(2024, 3, 4)]
        );
    }

    #[test]
    fn test_expand_crosses_month_and_leap_day() {
        let days: Vec<NaiveDate> = expand(date(2024, 2, 28), date(2024, 3, 1)).unwrap().collect();
        assert_eq!(days, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn test_expand_rejects_reversed_range() {
        let err = expand(date(2024, 3, 5), date(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRange { .. }));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 6, 10), date(2024, 6, 10)).unwrap();
        assert_eq!(range.days().count(), 1);
        assert_eq!(range.nights(), 0);
        assert_eq!(nights(date(2024, 6, 10), date(2024, 6, 10)), 0);
    }

    #[test]
    fn test_days_are_restartable() {
        let range = DateRange::new(date(2024, 1, 30), date(2024, 2, 2)).unwrap();
        let days = range.days();
        let first: Vec<_> = days.clone().collect();
        let second: Vec<_> = days.collect();
        assert_eq!(first, second);
        assert_eq!(range.days().len() as i64, range.day_count());
    }

    #[test]
    fn test_nights_and_union() {
        let a = DateRange::new(date(2024, 5, 1), date(2024, 5, 4)).unwrap();
        let b = DateRange::new(date(2024, 5, 3), date(2024, 5, 9)).unwrap();
        assert_eq!(a.nights(), 3);
        let u = a.union(&b);
        assert_eq!(u.start(), date(2024, 5, 1));
        assert_eq!(u.end(), date(2024, 5, 9));
    }
}
