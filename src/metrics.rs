//! Derived numbers shown next to the age: milestones, totals in other units
//! and "fun facts". Everything is plain arithmetic over `total_elapsed_ms`
//! and `years`; the modeling constants live in [`Assumptions`].

use serde::{Deserialize, Serialize};

use crate::age::AgeBreakdown;
use crate::units::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, group_thousands};

/// Average resting heart rate, beats per minute.
pub const DEFAULT_HEART_RATE_BPM: u64 = 72;
/// Hours of sleep per day (8 of 24, i.e. a third of all days).
pub const DEFAULT_SLEEP_HOURS_PER_DAY: u64 = 8;
/// Approximate distance Earth covers along its orbit in one year, in miles.
pub const DEFAULT_ORBIT_MILES_PER_YEAR: u64 = 584_000_000;

/// Modeling assumptions behind the fun facts. Not physical law; every value
/// can be overridden from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub heart_rate_bpm: u64,
    pub sleep_hours_per_day: u64,
    pub orbit_miles_per_year: u64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            heart_rate_bpm: DEFAULT_HEART_RATE_BPM,
            sleep_hours_per_day: DEFAULT_SLEEP_HOURS_PER_DAY,
            orbit_miles_per_year: DEFAULT_ORBIT_MILES_PER_YEAR,
        }
    }
}

impl Assumptions {
    pub fn heartbeats(&self, age: &AgeBreakdown) -> u64 {
        let beats = age.total_elapsed_ms as u128 * self.heart_rate_bpm as u128 / MS_PER_MINUTE as u128;
        beats.min(u64::MAX as u128) as u64
    }

    pub fn days_slept(&self, age: &AgeBreakdown) -> u64 {
        total_days(age) * self.sleep_hours_per_day / 24
    }

    pub fn orbit_miles(&self, age: &AgeBreakdown) -> u64 {
        (age.years as u64).saturating_mul(self.orbit_miles_per_year)
    }
}

pub fn total_days(age: &AgeBreakdown) -> u64 {
    age.total_elapsed_ms / MS_PER_DAY
}

pub fn total_weeks(age: &AgeBreakdown) -> u64 {
    total_days(age) / 7
}

pub fn total_hours(age: &AgeBreakdown) -> u64 {
    age.total_elapsed_ms / MS_PER_HOUR
}

pub fn total_minutes(age: &AgeBreakdown) -> u64 {
    age.total_elapsed_ms / MS_PER_MINUTE
}

pub fn total_seconds(age: &AgeBreakdown) -> u64 {
    age.total_elapsed_ms / MS_PER_SECOND
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneUnit {
    Years,
    Days,
    Minutes,
    Seconds,
}

impl MilestoneUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneUnit::Years => "years",
            MilestoneUnit::Days => "days",
            MilestoneUnit::Minutes => "minutes",
            MilestoneUnit::Seconds => "seconds",
        }
    }

    fn current(self, age: &AgeBreakdown) -> u64 {
        match self {
            MilestoneUnit::Years => age.years as u64,
            MilestoneUnit::Days => total_days(age),
            MilestoneUnit::Minutes => total_minutes(age),
            MilestoneUnit::Seconds => total_seconds(age),
        }
    }
}

pub struct Milestone {
    pub name: &'static str,
    pub target: u64,
    pub unit: MilestoneUnit,
}

pub const MILESTONES: [Milestone; 10] = [
    Milestone { name: "Sweet 16", target: 16, unit: MilestoneUnit::Years },
    Milestone { name: "Adult (18)", target: 18, unit: MilestoneUnit::Years },
    Milestone { name: "Quarter Century", target: 25, unit: MilestoneUnit::Years },
    Milestone { name: "The Big 3-0", target: 30, unit: MilestoneUnit::Years },
    Milestone { name: "Wise 40s", target: 40, unit: MilestoneUnit::Years },
    Milestone { name: "Half Century", target: 50, unit: MilestoneUnit::Years },
    Milestone { name: "1000 Days Milestone", target: 1_000, unit: MilestoneUnit::Days },
    Milestone { name: "5000 Days Milestone", target: 5_000, unit: MilestoneUnit::Days },
    Milestone { name: "1 Million Minutes", target: 1_000_000, unit: MilestoneUnit::Minutes },
    Milestone { name: "1 Billion Seconds", target: 1_000_000_000, unit: MilestoneUnit::Seconds },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneProgress {
    pub name: &'static str,
    pub target_value: u64,
    pub unit: MilestoneUnit,
    pub current_value: u64,
    pub percent_complete: f64,
}

impl MilestoneProgress {
    pub fn is_reached(&self) -> bool {
        self.current_value >= self.target_value
    }

    /// `current / target unit`, e.g. `12,065 / 5,000 days`.
    pub fn progress_label(&self) -> String {
        format!(
            "{} / {} {}",
            group_thousands(self.current_value),
            group_thousands(self.target_value),
            self.unit.as_str()
        )
    }
}

/// `min(current / target * 100, 100)`, zero for a zero target.
pub fn percent_of(current: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (current as f64 / target as f64 * 100.0).min(100.0)
}

pub fn compute_milestones(age: &AgeBreakdown) -> Vec<MilestoneProgress> {
    MILESTONES
        .iter()
        .map(|m| {
            let current = m.unit.current(age);
            MilestoneProgress {
                name: m.name,
                target_value: m.target,
                unit: m.unit,
                current_value: current,
                percent_complete: percent_of(current, m.target),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitValue {
    pub name: String,
    pub value: u64,
}

pub fn compute_alternative_units(age: &AgeBreakdown, assumptions: &Assumptions) -> Vec<UnitValue> {
    vec![
        UnitValue {
            name: "Total Days".to_string(),
            value: total_days(age),
        },
        UnitValue {
            name: "Total Weeks".to_string(),
            value: total_weeks(age),
        },
        UnitValue {
            name: "Total Hours".to_string(),
            value: total_hours(age),
        },
        UnitValue {
            name: format!("Heartbeats (~{}bpm)", assumptions.heart_rate_bpm),
            value: assumptions.heartbeats(age),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunFact {
    pub label: &'static str,
    pub text: String,
}

pub fn compute_fun_facts(age: &AgeBreakdown, assumptions: &Assumptions) -> Vec<FunFact> {
    let years = age.years as u64;
    let candles = years * (years + 1) / 2;

    vec![
        FunFact {
            label: "sunrises",
            text: format!("You've witnessed {} sunrises", group_thousands(total_days(age))),
        },
        FunFact {
            label: "sleep",
            text: format!(
                "You've slept roughly {} days (assuming {}hrs/day)",
                group_thousands(assumptions.days_slept(age)),
                assumptions.sleep_hours_per_day
            ),
        },
        FunFact {
            label: "orbit",
            text: format!(
                "Earth traveled {} miles around the sun with you",
                group_thousands(assumptions.orbit_miles(age))
            ),
        },
        FunFact {
            label: "heartbeats",
            text: format!(
                "Your heart beat about {} times (~{} bpm)",
                group_thousands(assumptions.heartbeats(age)),
                assumptions.heart_rate_bpm
            ),
        },
        FunFact {
            label: "candles",
            text: format!("You blew out {} birthday candles total", group_thousands(candles)),
        },
        FunFact {
            label: "weeks",
            text: format!(
                "That's {} weeks of your unique journey",
                group_thousands(total_weeks(age))
            ),
        },
    ]
}
