//! Countdown to the next birthday.
//!
//! The anniversary is anchored at local midnight in the zone of `now`. A
//! Feb 29 birthday falls on Mar 1 in common years.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::age::is_leap_year;
use crate::error::{AgeError, Result};
use crate::units::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Longest DST gap we step over when looking for a valid local midnight.
const MAX_GAP_STEPS: i64 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub total_ms: u64,
}

impl Countdown {
    /// Splits a millisecond duration into days/hours/minutes/seconds.
    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: (ms / MS_PER_DAY) as u32,
            hours: (ms % MS_PER_DAY / MS_PER_HOUR) as u32,
            minutes: (ms % MS_PER_HOUR / MS_PER_MINUTE) as u32,
            seconds: (ms % MS_PER_MINUTE / MS_PER_SECOND) as u32,
            total_ms: ms,
        }
    }
}

/// Date of the birthday anniversary in `year`.
pub fn anniversary_in(birth: NaiveDate, year: i32) -> Result<NaiveDate> {
    let (month, day) = if birth.month() == 2 && birth.day() == 29 && !is_leap_year(year) {
        (3, 1)
    } else {
        (birth.month(), birth.day())
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| AgeError::OutOfRange {
        what: format!("the {year} anniversary of {birth}"),
    })
}

/// First instant of `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight that
/// falls in a DST gap resolves to the first valid half hour after it.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);

    if let Some(t) = tz.from_local_datetime(&midnight).earliest() {
        return t;
    }

    for step in 1..=MAX_GAP_STEPS {
        let candidate = midnight + Duration::minutes(30 * step);
        if let Some(t) = tz.from_local_datetime(&candidate).earliest() {
            debug!(%date, "local midnight skipped by DST, using {candidate}");
            return t;
        }
    }

    tz.from_utc_datetime(&midnight)
}

/// Time left until the next anniversary of `birth`'s month and day.
///
/// The anniversary moves to the following year when this year's midnight is
/// at or before `now`, so the result is always positive.
pub fn compute_countdown<Tz: TimeZone>(
    birth: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> Result<Countdown> {
    let tz = now.timezone();
    let birth_day = birth.date_naive();

    let mut next = local_midnight(anniversary_in(birth_day, now.year())?, &tz);
    if next <= *now {
        next = local_midnight(anniversary_in(birth_day, now.year() + 1)?, &tz);
    }

    let ms = next.signed_duration_since(now).num_milliseconds();
    Ok(Countdown::from_millis(ms.max(0) as u64))
}
