//! Civil calendar arithmetic.
//!
//! Converts between `YYYY-MM-DD HH:MM:SS` (UTC, proleptic Gregorian) and
//! seconds since the Unix epoch without a calendar library. Both the text →
//! epoch direction (scanning) and the epoch → text direction (binding time
//! arguments) go through this module.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: i64 = 86_400;

/// Days in a 400 year Gregorian cycle.
const DAYS_PER_CYCLE: i64 = 146_097;

const MONTH_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A broken-down UTC date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Result of matching text against `YYYY-MM-DD[ HH:MM:SS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed {
    pub datetime: DateTime,

    /// Number of fields matched: 3 for a date, 6 for a date and time.
    pub fields: u8,
}

pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i64, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        MONTH_DAYS[usize::from(month - 1)]
    }
}

fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Leap years strictly before `year` (counting from year 1).
fn leap_years_before(year: i64) -> i64 {
    let y = year - 1;
    y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

impl DateTime {
    pub fn date(year: i64, month: u8, day: u8) -> DateTime {
        DateTime {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Seconds since 1970-01-01 00:00:00 UTC.
    pub fn to_epoch(&self) -> i64 {
        let mut days = 365 * (self.year - 1970) + leap_years_before(self.year)
            - leap_years_before(1970);

        for month in 1..self.month {
            days += i64::from(days_in_month(self.year, month));
        }

        days += i64::from(self.day) - 1;

        days * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Inverse of [`DateTime::to_epoch`].
    pub fn from_epoch(secs: i64) -> DateTime {
        let mut days = secs.div_euclid(SECONDS_PER_DAY);
        let rem = secs.rem_euclid(SECONDS_PER_DAY);

        let cycles = days.div_euclid(DAYS_PER_CYCLE);
        let mut year = 1970 + 400 * cycles;
        days -= cycles * DAYS_PER_CYCLE;

        while days >= days_in_year(year) {
            days -= days_in_year(year);
            year += 1;
        }

        let mut month = 1;
        while days >= i64::from(days_in_month(year, month)) {
            days -= i64::from(days_in_month(year, month));
            month += 1;
        }

        DateTime {
            year,
            month,
            day: days as u8 + 1,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Matches `YYYY-MM-DD` optionally followed by ` HH:MM:SS` (or `THH:MM:SS`).
///
/// A date not followed by ` ` or `T` matches as a 3-field date. After a
/// separator the time must be complete and in range. Out of range fields do
/// not match.
pub fn parse(text: &str) -> Option<Parsed> {
    let mut cursor = text.as_bytes();

    let year = number(&mut cursor)?;
    expect(&mut cursor, b'-')?;
    let month = number(&mut cursor)?;
    expect(&mut cursor, b'-')?;
    let day = number(&mut cursor)?;

    let mut datetime = DateTime::date(year, u8::try_from(month).ok()?, u8::try_from(day).ok()?);
    if !datetime.is_valid() {
        return None;
    }

    // A separator commits to a full time of day.
    let Some((b' ' | b'T', rest)) = cursor.split_first() else {
        return Some(Parsed {
            datetime,
            fields: 3,
        });
    };
    cursor = rest;

    let (hour, minute, second) = time_of_day(&mut cursor)?;
    datetime.hour = hour;
    datetime.minute = minute;
    datetime.second = second;

    if !datetime.is_valid() {
        return None;
    }

    Some(Parsed {
        datetime,
        fields: 6,
    })
}

fn time_of_day(cursor: &mut &[u8]) -> Option<(u8, u8, u8)> {
    let hour = number(cursor)?;
    expect(cursor, b':')?;
    let minute = number(cursor)?;
    expect(cursor, b':')?;
    let second = number(cursor)?;

    Some((
        u8::try_from(hour).ok()?,
        u8::try_from(minute).ok()?,
        u8::try_from(second).ok()?,
    ))
}

fn number(cursor: &mut &[u8]) -> Option<i64> {
    let len = cursor.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 || len > 9 {
        return None;
    }

    let (digits, rest) = cursor.split_at(len);
    *cursor = rest;

    Some(
        digits
            .iter()
            .fold(0, |acc, digit| acc * 10 + i64::from(digit - b'0')),
    )
}

fn expect(cursor: &mut &[u8], byte: u8) -> Option<()> {
    match cursor.split_first() {
        Some((first, rest)) if *first == byte => {
            *cursor = rest;
            Some(())
        }
        _ => None,
    }
}

/// Formats epoch seconds as `YYYY-MM-DD HH:MM:SS`.
pub fn format_epoch(secs: i64) -> String {
    DateTime::from_epoch(secs).to_string()
}

/// Converts epoch seconds to a `SystemTime`.
pub fn system_time(secs: i64) -> SystemTime {
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

/// Converts a `SystemTime` to whole epoch seconds, rounding towards the past.
pub fn epoch_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(before) => {
            let before = before.duration();
            let secs = before.as_secs() as i64;
            if before.subsec_nanos() == 0 {
                -secs
            } else {
                -secs - 1
            }
        }
    }
}
