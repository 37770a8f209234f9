//! Gregorian → Hijri conversion using the arithmetical "Kuwaiti" algorithm.
//!
//! The date is first turned into a Julian day number with the proleptic
//! Gregorian formula, then mapped onto the 30-year tabular Islamic cycle
//! (10 631 days). The tabular calendar can differ by a day from observed
//! moon sightings.
//!
//! Only dates on or after 1582-10-15 are supported. Earlier dates have no
//! Gregorian meaning here and convert to [`HijriDate::SENTINEL`].

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::{AgeError, Result};

/// Julian day number of 1 Muharram 1 AH (astronomical epoch) minus one.
const ISLAMIC_EPOCH_JD: i64 = 1_948_084;
/// Days in one 30-year Hijri cycle.
const CYCLE_DAYS: i64 = 10_631;
/// Mean Hijri year length in days.
const MEAN_YEAR: f64 = CYCLE_DAYS as f64 / 30.0;
/// Fractional day shift that places leap years at the Kuwaiti positions.
const CYCLE_SHIFT: f64 = 8.01 / 60.0;
/// Fixed month length used when borrowing days in a Hijri age.
const BORROWED_MONTH_DAYS: i32 = 30;

const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// First day of the Gregorian calendar.
pub const GREGORIAN_START: NaiveDate = match NaiveDate::from_ymd_opt(1582, 10, 15) {
    Some(date) => date,
    None => panic!("1582-10-15 is a valid date"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HijriDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl HijriDate {
    /// Returned for dates before the Gregorian calendar start.
    pub const SENTINEL: HijriDate = HijriDate {
        year: 0,
        month: 0,
        day: 0,
    };

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    pub fn month_name(&self) -> &'static str {
        match self.month {
            1..=12 => HIJRI_MONTH_NAMES[self.month as usize - 1],
            _ => "Unknown",
        }
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

/// Julian day number at noon of a proleptic Gregorian date.
pub fn julian_day(date: NaiveDate) -> i64 {
    let (mut y, mut m) = (date.year() as i64, date.month() as i64);
    if m < 3 {
        y -= 1;
        m += 12;
    }

    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);

    (365.25 * (y + 4716) as f64).floor() as i64
        + (30.6001 * (m + 1) as f64).floor() as i64
        + date.day() as i64
        + b
        - 1524
}

/// Converts a Gregorian date, failing with `PreGregorianDate` before 1582-10-15.
pub fn try_gregorian_to_hijri(date: NaiveDate) -> Result<HijriDate> {
    if date < GREGORIAN_START {
        return Err(AgeError::PreGregorianDate { date });
    }

    let mut z = julian_day(date) - ISLAMIC_EPOCH_JD;
    let cycle = z.div_euclid(CYCLE_DAYS);
    z -= CYCLE_DAYS * cycle;

    let year_in_cycle = ((z as f64 - CYCLE_SHIFT) / MEAN_YEAR).floor() as i64;
    let year = 30 * cycle + year_in_cycle;
    z -= (year_in_cycle as f64 * MEAN_YEAR + CYCLE_SHIFT).floor() as i64;

    let month = (((z as f64 + 28.5001) / 29.5).floor() as i64).min(12);
    let day = z - (29.5001 * month as f64 - 29.0).floor() as i64;

    Ok(HijriDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
    })
}

/// Converts a Gregorian date, returning [`HijriDate::SENTINEL`] before 1582-10-15.
pub fn gregorian_to_hijri(date: NaiveDate) -> HijriDate {
    try_gregorian_to_hijri(date).unwrap_or_else(|e| {
        debug!("hijri conversion skipped: {e}");
        HijriDate::SENTINEL
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HijriAgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl HijriAgeBreakdown {
    /// Component-wise difference `now - birth`.
    ///
    /// Day underflow borrows a 30-day month regardless of the real length of
    /// the preceding Hijri month. Zero when `now` precedes `birth`.
    pub fn between(birth: HijriDate, now: HijriDate) -> Self {
        let mut years = now.year - birth.year;
        let mut months = now.month as i32 - birth.month as i32;
        let mut days = now.day as i32 - birth.day as i32;

        if days < 0 {
            months -= 1;
            days += BORROWED_MONTH_DAYS;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        if years < 0 {
            return Self::default();
        }

        Self {
            years: years as u32,
            months: months as u32,
            days: days.max(0) as u32,
        }
    }
}

/// Hijri age of someone born on `birth` as of `today`.
pub fn compute_hijri_age(birth: NaiveDate, today: NaiveDate) -> Result<HijriAgeBreakdown> {
    let birth = try_gregorian_to_hijri(birth)?;
    let today = try_gregorian_to_hijri(today)?;
    Ok(HijriAgeBreakdown::between(birth, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hijri(year: i32, month: u32, day: u32) -> HijriDate {
        HijriDate { year, month, day }
    }

    #[test]
    fn julian_day_numbers() {
        assert_eq!(julian_day(date(2000, 1, 1)), 2_451_545);
        assert_eq!(julian_day(date(1582, 10, 15)), 2_299_161);
        assert_eq!(julian_day(date(2024, 3, 11)), 2_460_381);
    }

    #[test]
    fn gregorian_start_is_the_first_supported_day() {
        assert_eq!(GREGORIAN_START, date(1582, 10, 15));
        assert!(try_gregorian_to_hijri(GREGORIAN_START).is_ok());
        assert!(try_gregorian_to_hijri(GREGORIAN_START.pred_opt().unwrap()).is_err());
    }

    #[test]
    fn converts_known_dates() {
        assert_eq!(gregorian_to_hijri(date(2000, 1, 1)), hijri(1420, 9, 25));
        assert_eq!(gregorian_to_hijri(date(2025, 6, 26)), hijri(1447, 1, 1));
        assert_eq!(gregorian_to_hijri(date(2023, 7, 19)), hijri(1445, 1, 2));
        assert_eq!(gregorian_to_hijri(date(1992, 6, 14)), hijri(1412, 12, 14));
        assert_eq!(gregorian_to_hijri(date(1582, 10, 15)), hijri(990, 9, 18));
    }

    #[test]
    fn pre_gregorian_dates_return_sentinel() {
        let hd = gregorian_to_hijri(date(1582, 10, 14));
        assert_eq!(hd, HijriDate::SENTINEL);
        assert!(hd.is_sentinel());

        let err = try_gregorian_to_hijri(date(1000, 1, 1)).unwrap_err();
        assert!(matches!(err, AgeError::PreGregorianDate { .. }));
    }

    #[test]
    fn converted_fields_stay_in_range() {
        let mut d = GREGORIAN_START;
        let end = date(2100, 1, 1);
        while d < end {
            let hd = gregorian_to_hijri(d);
            assert!((1..=12).contains(&hd.month), "{d}: {hd:?}");
            assert!((1..=30).contains(&hd.day), "{d}: {hd:?}");
            d = d + chrono::Duration::days(17);
        }
    }

    #[test]
    fn displays_month_name() {
        assert_eq!(hijri(1447, 1, 1).to_string(), "1 Muharram 1447 AH");
        assert_eq!(hijri(1420, 9, 25).month_name(), "Ramadan");
        assert_eq!(HijriDate::SENTINEL.month_name(), "Unknown");
    }

    #[test]
    fn hijri_age_borrows_thirty_days() {
        let age = HijriAgeBreakdown::between(hijri(1410, 11, 21), hijri(1447, 1, 5));
        assert_eq!(age, HijriAgeBreakdown { years: 36, months: 1, days: 14 });
    }

    #[test]
    fn hijri_age_is_never_negative() {
        let age = HijriAgeBreakdown::between(hijri(1447, 1, 5), hijri(1410, 11, 21));
        assert_eq!(age, HijriAgeBreakdown::default());

        let age = HijriAgeBreakdown::between(hijri(1447, 3, 10), hijri(1447, 3, 9));
        assert_eq!(age, HijriAgeBreakdown::default());
    }

    #[test]
    fn hijri_age_from_gregorian_dates() {
        let age = compute_hijri_age(date(1992, 6, 14), date(2025, 6, 26)).unwrap();
        // 14 Dhu al-Hijjah 1412 → 1 Muharram 1447
        assert_eq!(age, HijriAgeBreakdown { years: 34, months: 0, days: 17 });
        assert!(compute_hijri_age(date(1500, 1, 1), date(2025, 6, 26)).is_err());
    }
}
