//! Calendar months for labelling schedule rows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Month};
use serde::Serialize;

/// A calendar month, stored as a year and zero-based month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    /// Create from a year and 1-based month. Months outside 1..=12 are
    /// normalized with carry into the year.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month0: 0 }.plus(i64::from(month) - 1)
    }

    /// The current local month.
    #[must_use]
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month0: today.month0(),
        }
    }

    /// Get the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Get the 1-based month number.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month0 + 1
    }

    /// Full English month name.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        Month::try_from(self.month() as u8)
            .map(|m| m.name())
            .unwrap_or("January")
    }

    /// Shift by `months`, carrying into the year.
    #[must_use]
    pub fn plus(self, months: i64) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month0) + months;
        Self {
            year: index.div_euclid(12) as i32,
            month0: index.rem_euclid(12) as u32,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in '{s}'"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month must be 1-12, got {month}"));
        }
        Ok(Self::new(year, month))
    }
}
