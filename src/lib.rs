//! Date arithmetic behind an age calculator: calendar age, next-birthday
//! countdown, Hijri conversion and derived "life" metrics.
//!
//! Every calculation is a pure function of a birth instant and an explicitly
//! passed "now"; callers that want a live display re-invoke them on their own
//! schedule.

pub mod age;
pub mod cli;
pub mod config;
pub mod countdown;
pub mod error;
pub mod hijri;
pub mod logger;
pub mod metrics;
pub mod report;
pub mod svg;
pub mod units;

pub use age::{AgeBreakdown, CalendarAge, calendar_age, compute_age, parse_birth_date};
pub use config::{AppConfig, ExportConfig};
pub use countdown::{Countdown, anniversary_in, compute_countdown, local_midnight};
pub use error::{AgeError, Result};
pub use hijri::{
    HijriAgeBreakdown, HijriDate, compute_hijri_age, gregorian_to_hijri, julian_day,
    try_gregorian_to_hijri,
};
pub use metrics::{
    Assumptions, FunFact, MilestoneProgress, MilestoneUnit, UnitValue, compute_alternative_units,
    compute_fun_facts, compute_milestones,
};
pub use report::AgeReport;
