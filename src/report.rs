use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::age::{AgeBreakdown, CalendarAge, calendar_age, compute_age, plural};
use crate::countdown::{Countdown, compute_countdown};
use crate::error::Result;
use crate::hijri::{HijriAgeBreakdown, HijriDate, gregorian_to_hijri};
use crate::metrics::{
    Assumptions, FunFact, MilestoneProgress, UnitValue, compute_alternative_units,
    compute_fun_facts, compute_milestones,
};
use crate::units::group_thousands;

/// Every figure the calculator shows for one `(birth, now)` pair.
#[derive(Debug, Clone, Serialize)]
pub struct AgeReport {
    pub birth_date: NaiveDate,
    pub computed_at: DateTime<Utc>,
    pub age: AgeBreakdown,
    pub calendar_age: CalendarAge,
    pub countdown: Countdown,
    pub hijri_birth: HijriDate,
    pub hijri_today: HijriDate,
    pub hijri_age: HijriAgeBreakdown,
    pub milestones: Vec<MilestoneProgress>,
    pub alternative_units: Vec<UnitValue>,
    pub fun_facts: Vec<FunFact>,
}

impl AgeReport {
    pub fn compute<Tz: TimeZone>(
        birth: &DateTime<Tz>,
        now: &DateTime<Tz>,
        assumptions: &Assumptions,
    ) -> Result<Self> {
        let age = compute_age(birth.with_timezone(&Utc), now.with_timezone(&Utc))?;
        let countdown = compute_countdown(birth, now)?;

        let birth_date = birth.date_naive();
        let today = now.date_naive();
        let calendar_age = calendar_age(birth_date, today)?;

        let hijri_birth = gregorian_to_hijri(birth_date);
        let hijri_today = gregorian_to_hijri(today);
        // A sentinel on either side would yield a meaningless difference.
        let hijri_age = if hijri_birth.is_sentinel() || hijri_today.is_sentinel() {
            HijriAgeBreakdown::default()
        } else {
            HijriAgeBreakdown::between(hijri_birth, hijri_today)
        };

        Ok(Self {
            birth_date,
            computed_at: now.with_timezone(&Utc),
            age,
            calendar_age,
            countdown,
            hijri_birth,
            hijri_today,
            hijri_age,
            milestones: compute_milestones(&age),
            alternative_units: compute_alternative_units(&age, assumptions),
            fun_facts: compute_fun_facts(&age, assumptions),
        })
    }

    /// Plain-text summary suitable for sharing or copying to a clipboard.
    pub fn share_text(&self) -> String {
        let a = &self.age;
        let c = &self.countdown;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "I am {}, {}, {}, {}, {} and {} old!",
            count(a.years, "year"),
            count(a.months, "month"),
            count(a.days, "day"),
            count(a.hours, "hour"),
            count(a.minutes, "minute"),
            count(a.seconds, "second")
        );
        let _ = writeln!(
            out,
            "Next birthday in {}, {}, {} and {}.",
            count(c.days, "day"),
            count(c.hours, "hour"),
            count(c.minutes, "minute"),
            count(c.seconds, "second")
        );
        if !self.hijri_birth.is_sentinel() {
            let h = &self.hijri_age;
            let _ = writeln!(
                out,
                "Born {} ({}, {}, {} in the Hijri calendar).",
                self.hijri_birth,
                count(h.years, "year"),
                count(h.months, "month"),
                count(h.days, "day")
            );
        }
        for m in &self.milestones {
            let _ = writeln!(
                out,
                "{}: {} ({:.1}%)",
                m.name,
                m.progress_label(),
                m.percent_complete
            );
        }
        for unit in &self.alternative_units {
            let _ = writeln!(out, "{}: {}", unit.name, group_thousands(unit.value));
        }
        for fact in &self.fun_facts {
            let _ = writeln!(out, "- {}", fact.text);
        }

        out
    }
}

fn count(n: u32, unit: &str) -> String {
    format!("{n} {unit}{}", plural(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_combines_all_calculations() {
        let birth = Utc.with_ymd_and_hms(1992, 6, 14, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 26, 12, 0, 0).unwrap();
        let report = AgeReport::compute(&birth, &now, &Assumptions::default()).unwrap();

        assert_eq!(report.age.years, 33);
        assert_eq!(report.calendar_age, CalendarAge { years: 33, months: 0, days: 12 });
        assert_eq!(report.countdown.days, 352);
        assert_eq!(report.hijri_birth, HijriDate { year: 1412, month: 12, day: 14 });
        assert_eq!(report.hijri_today, HijriDate { year: 1447, month: 1, day: 1 });
        assert_eq!(report.milestones.len(), 10);
        assert_eq!(report.alternative_units.len(), 4);
        assert_eq!(report.fun_facts.len(), 6);
    }

    #[test]
    fn report_rejects_future_birth() {
        let birth = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(AgeReport::compute(&birth, &now, &Assumptions::default()).is_err());
    }

    #[test]
    fn pre_gregorian_birth_has_empty_hijri_age() {
        let birth = Utc.with_ymd_and_hms(1500, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let report = AgeReport::compute(&birth, &now, &Assumptions::default()).unwrap();
        assert!(report.hijri_birth.is_sentinel());
        assert_eq!(report.hijri_age, HijriAgeBreakdown::default());
        assert!(!report.share_text().contains("Hijri"));
    }

    #[test]
    fn share_text_mentions_every_section() {
        let birth = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let text = AgeReport::compute(&birth, &now, &Assumptions::default())
            .unwrap()
            .share_text();

        assert!(text.starts_with(
            "I am 1 year, 0 months, 1 day, 0 hours, 0 minutes and 0 seconds old!"
        ));
        assert!(text.contains("Next birthday in 365 days, 0 hours, 0 minutes and 0 seconds."));
        assert!(text.contains("(1 year, 0 months, 1 day in the Hijri calendar)"));
        assert!(text.contains("Sweet 16: 1 / 16 years ("));
        assert!(text.contains("1000 Days Milestone: 366 / 1,000 days (36.6%)"));
        assert!(text.contains("Next birthday in 365 days"));
        assert!(text.contains("25 Ramadan 1420 AH"));
        assert!(text.contains("Total Days: 366"));
        assert!(text.contains("- You've witnessed 366 sunrises"));
    }
}
