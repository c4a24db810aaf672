//! How long a job lasted, as shown in the list ("3 yrs 11 mos").

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Whole years and months between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenure {
    pub years: u32,
    pub months: u32,
}

impl Tenure {
    /// Count whole calendar months from `start` to `end`. A month only counts
    /// once `end` reaches the start's day-of-month. Inverted ranges are zero.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let mut total = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
        if end.day() < start.day() {
            total -= 1;
        }
        let total = total.max(0) as u32;
        Self {
            years: total / 12,
            months: total % 12,
        }
    }
}

impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yr = if self.years == 1 { "yr" } else { "yrs" };
        let mo = if self.months == 1 { "mo" } else { "mos" };
        write!(f, "{} {yr} {} {mo}", self.years, self.months)
    }
}

/// `"2020 - 2023"` label for the list entry.
pub fn year_span(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.year(), end.year())
}
