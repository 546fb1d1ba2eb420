pub mod aggregate;
pub mod cycle;
pub mod deductions;
pub mod gross;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{Datelike, NaiveDate};

/// A calendar month in "YYYY-MM" form, the key every payroll run is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayMonth {
    year: i32,
    month: u32,
}

impl PayMonth {
    pub fn new(year: i32, month: u32) -> anyhow::Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("month out of range: {month}");
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based calendar month number (August = 8).
    pub fn month_number(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Safe: month validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// First day of the following month, for half-open date-range queries.
    pub fn next_month_start(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1).unwrap_or_default()
    }
}

impl FromStr for PayMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((y, m)) = s.split_once('-') else {
            bail!("expected YYYY-MM, got {s:?}");
        };
        if y.len() != 4 || m.len() != 2 {
            bail!("expected YYYY-MM, got {s:?}");
        }
        let year: i32 = y.parse()?;
        let month: u32 = m.parse()?;
        Self::new(year, month)
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
