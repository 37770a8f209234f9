use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgeError {
    #[error("birth date {birth} is after the current time {now}")]
    InvalidFutureDate {
        birth: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("invalid date input {input:?}: {reason}")]
    InvalidDateInput { input: String, reason: String },

    #[error("{date} is before the Gregorian calendar start (1582-10-15)")]
    PreGregorianDate { date: NaiveDate },

    #[error("{what} is outside the supported calendar range")]
    OutOfRange { what: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgeError {
    /// True for errors caused by the caller's date values rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AgeError::InvalidFutureDate { .. }
                | AgeError::InvalidDateInput { .. }
                | AgeError::PreGregorianDate { .. }
                | AgeError::OutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AgeError>;
