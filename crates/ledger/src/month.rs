use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// A budget month, normalized to the first day of the month.
///
/// Allocations are keyed by `(category, month)`; normalizing here means the
/// store never sees two allocations for the same calendar month that differ
/// only in day-of-month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetMonth(NaiveDate);

impl BudgetMonth {
    /// Builds a month from a year and 1-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| LedgerError::Validation(format!("invalid month: {year}-{month:02}")))
    }

    /// Normalizes an arbitrary date to its containing month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // from_ymd_opt cannot fail for day 1 of an existing date's month.
        Self(date.with_day(1).unwrap_or(date))
    }

    /// First calendar day of the month. Aggregates use this for
    /// strictly-before comparisons.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Parses `YYYY-MM` or a full `YYYY-MM-DD` date (which is normalized).
    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        let invalid = || LedgerError::Validation(format!("invalid month: {trimmed}"));
        let (year_str, month_str) = trimmed.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// The following month.
    #[must_use]
    pub fn next(self) -> Self {
        let (year, month) = if self.0.month() == 12 {
            (self.0.year() + 1, 1)
        } else {
            (self.0.year(), self.0.month() + 1)
        };
        // Day 1 of a valid year/month pair always exists.
        Self(NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(self.0))
    }
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl From<NaiveDate> for BudgetMonth {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_first_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let month = BudgetMonth::from_date(date);
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn parses_both_forms() {
        assert_eq!(
            BudgetMonth::parse("2026-03").unwrap(),
            BudgetMonth::new(2026, 3).unwrap()
        );
        assert_eq!(
            BudgetMonth::parse("2026-03-31").unwrap(),
            BudgetMonth::new(2026, 3).unwrap()
        );
        assert!(BudgetMonth::parse("2026-13").is_err());
        assert!(BudgetMonth::parse("march").is_err());
    }

    #[test]
    fn orders_chronologically() {
        let feb = BudgetMonth::new(2026, 2).unwrap();
        let mar = BudgetMonth::new(2026, 3).unwrap();
        assert!(feb < mar);
        assert_eq!(feb.next(), mar);
        assert_eq!(BudgetMonth::new(2025, 12).unwrap().next(), BudgetMonth::new(2026, 1).unwrap());
    }

    #[test]
    fn displays_year_month() {
        assert_eq!(BudgetMonth::new(2026, 3).unwrap().to_string(), "2026-03");
    }
}
