//! Amiga timestamp handling.

use crate::checksum::read_i32_be;
use crate::constants::BSIZE;

/// Amiga timestamp: days since January 1, 1978, minutes since midnight
/// and ticks of 1/50 second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmigaDate {
    /// Days since January 1, 1978.
    pub days: i32,
    /// Minutes since midnight.
    pub mins: i32,
    /// Ticks (1/50 second).
    pub ticks: i32,
}

impl AmigaDate {
    /// Build a timestamp from raw field values.
    #[inline]
    pub const fn new(days: i32, mins: i32, ticks: i32) -> Self {
        Self { days, mins, ticks }
    }

    /// Read the three consecutive longwords of a date field.
    #[inline]
    pub(crate) const fn read(buf: &[u8; BSIZE], offset: usize) -> Self {
        Self {
            days: read_i32_be(buf, offset),
            mins: read_i32_be(buf, offset + 4),
            ticks: read_i32_be(buf, offset + 8),
        }
    }

    /// Convert to a calendar date and time of day.
    pub fn to_calendar(self) -> CalendarDate {
        let (year, month, day) = split_days(self.days);
        CalendarDate {
            year,
            month,
            day,
            hour: (self.mins / 60) as u8,
            minute: (self.mins % 60) as u8,
            second: (self.ticks / 50) as u8,
        }
    }

    /// Seconds since the Unix epoch.
    ///
    /// The Amiga epoch is 2922 days (eight years, two of them leap) after
    /// 1970-01-01.
    #[inline]
    pub const fn to_unix_timestamp(self) -> i64 {
        const AMIGA_EPOCH_DAYS: i64 = 2922;

        (self.days as i64 + AMIGA_EPOCH_DAYS) * 86_400
            + self.mins as i64 * 60
            + self.ticks as i64 / 50
    }
}

/// Calendar form of an Amiga timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarDate {
    /// Year (1978 onward).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-59).
    pub second: u8,
}

/// Split days since 1978-01-01 into year, month and day of month.
fn split_days(mut days: i32) -> (u16, u8, u8) {
    let mut year: u16 = 1978;
    while days >= year_len(year) {
        days -= year_len(year);
        year += 1;
    }

    let mut month: u8 = 1;
    while days >= month_len(year, month) {
        days -= month_len(year, month);
        month += 1;
    }

    (year, month, (days + 1) as u8)
}

#[inline]
fn year_len(year: u16) -> i32 {
    if is_leap(year) { 366 } else { 365 }
}

fn month_len(year: u16, month: u8) -> i32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[inline]
const fn is_leap(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
