//! age.rs
//!
//! Two flavours of "how old is this person":
//!
//!   • [`compute_age`] decomposes the raw elapsed duration by reading the UTC
//!     calendar fields of `1970-01-01T00:00:00Z + elapsed`. The result is a
//!     non-overlapping breakdown of `total_elapsed_ms`, but it is the calendar
//!     shape of the *duration*, not the age walked forward from the birth date.
//!     It can read one day off against what people expect around leap years
//!     and short months. This is the value the live display shows.
//!
//!   • [`calendar_age`] walks from the birth date with the real month lengths
//!     (borrowing from years and months by hand, since chrono has no
//!     relativedelta equivalent).

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::error::{AgeError, Result};

/// Calendar breakdown of an elapsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub total_elapsed_ms: u64,
}

/// Computes the epoch-relative age breakdown between `birth` and `now`.
pub fn compute_age(birth: DateTime<Utc>, now: DateTime<Utc>) -> Result<AgeBreakdown> {
    if birth > now {
        return Err(AgeError::InvalidFutureDate { birth, now });
    }

    let elapsed_ms = now.signed_duration_since(birth).num_milliseconds();
    let out_of_range = || AgeError::OutOfRange {
        what: format!("an elapsed time of {elapsed_ms} ms"),
    };
    let synthetic = DateTime::<Utc>::from_timestamp_millis(elapsed_ms).ok_or_else(out_of_range)?;

    // The epoch sits at year 1970, month0 0, day 1, 00:00:00, so the
    // offsets from those fields are the breakdown.
    let years = u32::try_from(synthetic.year() - 1970).map_err(|_| out_of_range())?;

    Ok(AgeBreakdown {
        years,
        months: synthetic.month0(),
        days: synthetic.day0(),
        hours: synthetic.hour(),
        minutes: synthetic.minute(),
        seconds: synthetic.second(),
        total_elapsed_ms: elapsed_ms as u64,
    })
}

/// Parses the date-only birth input (`YYYY-MM-DD`).
pub fn parse_birth_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AgeError::InvalidDateInput {
            input: input.to_string(),
            reason: "birth date is empty".to_string(),
        });
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| AgeError::InvalidDateInput {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Age obtained by walking forward from the birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarAge {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for CalendarAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

/// Returns the calendar-walk age of someone born on `birthdate` as of `today`.
pub fn calendar_age(birthdate: NaiveDate, today: NaiveDate) -> Result<CalendarAge> {
    if birthdate > today {
        return Err(AgeError::InvalidFutureDate {
            birth: birthdate.and_time(NaiveTime::MIN).and_utc(),
            now: today.and_time(NaiveTime::MIN).and_utc(),
        });
    }

    let mut years = today.year() - birthdate.year();
    let mut months = today.month() as i32 - birthdate.month() as i32;
    let mut days = today.day() as i32 - birthdate.day() as i32;

    // Fix day underflow
    if days < 0 {
        months -= 1;

        let (prev_year, prev_month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };

        // The last monthiversary fell in the previous month, on the birth day
        // or that month's last day when it is shorter.
        let days_in_prev_month = days_in_month(prev_year, prev_month);
        days = (today.day() + days_in_prev_month - birthdate.day().min(days_in_prev_month)) as i32;
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    Ok(CalendarAge {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    })
}

pub(crate) fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Returns number of days in a given year/month (handles leap years)
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_instant_is_all_zero() {
        let t = utc(2000, 1, 1, 0, 0, 0);
        let age = compute_age(t, t).unwrap();
        assert_eq!(
            age,
            AgeBreakdown {
                years: 0,
                months: 0,
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0,
                total_elapsed_ms: 0,
            }
        );
    }

    #[test]
    fn leap_year_span_reads_one_extra_day() {
        // 2000 has 366 days; 1970 has 365, so the synthetic instant is 1971-01-02.
        let age = compute_age(utc(2000, 1, 1, 0, 0, 0), utc(2001, 1, 1, 0, 0, 0)).unwrap();
        assert_eq!((age.years, age.months, age.days), (1, 0, 1));
        assert_eq!(age.total_elapsed_ms, 366 * 86_400_000);
    }

    #[test]
    fn common_year_span_is_exactly_one_year() {
        let age = compute_age(utc(2001, 1, 1, 0, 0, 0), utc(2002, 1, 1, 0, 0, 0)).unwrap();
        assert_eq!((age.years, age.months, age.days), (1, 0, 0));
        assert_eq!((age.hours, age.minutes, age.seconds), (0, 0, 0));
    }

    #[test]
    fn time_of_day_fields_come_from_the_remainder() {
        let birth = utc(2020, 5, 1, 0, 0, 0);
        let now = birth + Duration::days(40) + Duration::hours(5) + Duration::minutes(6) + Duration::seconds(7);
        let age = compute_age(birth, now).unwrap();
        // Day 40 after the epoch is 1970-02-10.
        assert_eq!(
            (age.years, age.months, age.days, age.hours, age.minutes, age.seconds),
            (0, 1, 9, 5, 6, 7)
        );
    }

    #[test]
    fn sub_second_remainder_is_kept_in_total_only() {
        let birth = utc(2020, 5, 1, 0, 0, 0);
        let now = birth + Duration::milliseconds(1_999);
        let age = compute_age(birth, now).unwrap();
        assert_eq!(age.seconds, 1);
        assert_eq!(age.total_elapsed_ms, 1_999);
    }

    #[test]
    fn future_birth_is_rejected() {
        let now = utc(2020, 1, 1, 0, 0, 0);
        for offset in [1, 1_000, 86_400_000, 10 * 365 * 86_400_000] {
            let birth = now + Duration::milliseconds(offset);
            let err = compute_age(birth, now).unwrap_err();
            assert!(matches!(err, AgeError::InvalidFutureDate { .. }));
        }
    }

    #[test]
    fn fields_stay_within_calendar_bounds() {
        let birth = utc(1987, 11, 23, 17, 41, 9);
        let mut now = birth;
        for _ in 0..2_000 {
            now += Duration::seconds(7_919_713);
            let age = compute_age(birth, now).unwrap();
            assert!(age.months <= 11);
            assert!(age.days <= 30);
            assert!(age.hours <= 23);
            assert!(age.minutes <= 59);
            assert!(age.seconds <= 59);
        }
    }

    #[test]
    fn compute_age_is_deterministic() {
        let birth = utc(1990, 6, 14, 0, 0, 0);
        let now = utc(2024, 2, 29, 13, 37, 0);
        assert_eq!(compute_age(birth, now).unwrap(), compute_age(birth, now).unwrap());
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_birth_date(" 1992-06-14 ").unwrap(), date(1992, 6, 14));
    }

    #[test]
    fn rejects_malformed_dates() {
        for input in ["", "14/06/1992", "1992-02-30", "yesterday"] {
            let err = parse_birth_date(input).unwrap_err();
            assert!(matches!(err, AgeError::InvalidDateInput { .. }), "{input}");
        }
    }

    #[test]
    fn calendar_age_borrows_from_previous_month() {
        let age = calendar_age(date(1992, 6, 14), date(2025, 3, 10)).unwrap();
        // Feb 2025 has 28 days: 10 + 28 - 14 = 24.
        assert_eq!(age, CalendarAge { years: 32, months: 8, days: 24 });
    }

    #[test]
    fn calendar_age_handles_birth_day_past_short_month() {
        let age = calendar_age(date(2000, 1, 31), date(2000, 3, 1)).unwrap();
        assert_eq!(age, CalendarAge { years: 0, months: 1, days: 1 });
    }

    #[test]
    fn calendar_age_for_leap_day_birth() {
        let age = calendar_age(date(2000, 2, 29), date(2001, 2, 28)).unwrap();
        assert_eq!(age, CalendarAge { years: 0, months: 11, days: 30 });
        let age = calendar_age(date(2000, 2, 29), date(2001, 3, 1)).unwrap();
        assert_eq!(age, CalendarAge { years: 1, months: 0, days: 1 });
    }

    #[test]
    fn calendar_age_rejects_future_birth() {
        assert!(calendar_age(date(2030, 1, 1), date(2025, 1, 1)).is_err());
    }

    #[test]
    fn calendar_age_display_pluralizes() {
        let age = CalendarAge { years: 1, months: 2, days: 1 };
        assert_eq!(age.to_string(), "1 year, 2 months, 1 day");
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }
}
