//! Zone serial arithmetic (`YYYYMMDDnn`).

use chrono::{Datelike, NaiveDate, Utc};

/// Smallest valid 10-digit serial
pub const MIN_SERIAL: u32 = 1_000_000_000;

/// `YYYYMMDD` as an integer.
pub fn date_stamp(date: NaiveDate) -> u32 {
    // Years are at most four digits for any date that fits a 32-bit serial.
    let year = u32::try_from(date.year()).unwrap_or(0);
    year * 10_000 + date.month() * 100 + date.day()
}

/// Current UTC date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Serial for a brand new zone: the day's first revision (`YYYYMMDD01`).
pub fn initial_serial(date: NaiveDate) -> u32 {
    date_stamp(date).saturating_mul(100).saturating_add(1)
}

/// Next serial after a change: `max(current + 1, YYYYMMDD00)`.
///
/// Never returns a value lower than `current + 1`, so the serial only moves forward.
pub fn next_serial(current: u32, date: NaiveDate) -> u32 {
    current
        .saturating_add(1)
        .max(date_stamp(date).saturating_mul(100))
}

/// Whether `serial` has the 10-digit `YYYYMMDDnn` shape.
pub fn is_valid_serial(serial: u32) -> bool {
    serial >= MIN_SERIAL
}
