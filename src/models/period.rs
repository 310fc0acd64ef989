//! Pay period model.
//!
//! A settlement is always computed for one calendar month. This module defines
//! [`Period`], a year-month identifier that parses from and renders as
//! `"YYYY-MM"`, and answers whether a dated activity record falls inside it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar year-month identifying a pay period.
///
/// # Example
///
/// ```
/// use settlement_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period: Period = "2025-03".parse().unwrap();
/// assert_eq!(period.to_string(), "2025-03");
/// assert!(period.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period, validating the month and the year range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                value: format!("{year:04}-{month:02}"),
                message: "month must be between 1 and 12".to_string(),
            });
        }
        if !(1..=9999).contains(&year) {
            return Err(EngineError::InvalidPeriod {
                value: format!("{year}-{month:02}"),
                message: "year must have four digits".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the period a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Checks whether a date falls within this period (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        Period::of(date) == *self
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            value: value.to_string(),
            message: message.to_string(),
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EngineError::MissingField {
                field: "period".to_string(),
            });
        }

        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| invalid("expected format YYYY-MM"))?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid("expected format YYYY-MM"));
        }

        let year: i32 = year.parse().map_err(|_| invalid("year is not a number"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| invalid("month is not a number"))?;

        Self::new(year, month).map_err(|err| match err {
            EngineError::InvalidPeriod { message, .. } => invalid(&message),
            other => other,
        })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
