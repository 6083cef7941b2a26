use std::{fmt, ops::RangeInclusive, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::BudgetError;

/// Years representable in the four-digit `YYYY-MM` form.
pub const YEAR_RANGE: RangeInclusive<i32> = 0..=9999;

/// A calendar month, displayed and persisted as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, BudgetError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidMonth { month });
        }
        if !YEAR_RANGE.contains(&year) {
            return Err(BudgetError::InvalidYear { year });
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in. Years outside [`YEAR_RANGE`] are clamped to it.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end()),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month before, or `self` at the start of [`YEAR_RANGE`].
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            if self.year == *YEAR_RANGE.start() {
                return *self;
            }
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after, or `self` at the end of [`YEAR_RANGE`].
    pub fn next(&self) -> Self {
        if self.month == 12 {
            if self.year == *YEAR_RANGE.end() {
                return *self;
            }
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Long label such as `January 2025`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || BudgetError::InvalidInput(format!("`{raw}` is not a YYYY-MM month"));
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_months() {
        assert!(MonthKey::new(2025, 0).is_err());
        assert!(MonthKey::new(2025, 13).is_err());
        assert!(MonthKey::new(2025, 12).is_ok());
    }

    #[test]
    fn navigation_wraps_years() {
        let january = MonthKey::new(2025, 1).unwrap();
        assert_eq!(january.previous(), MonthKey::new(2024, 12).unwrap());
        let december = MonthKey::new(2024, 12).unwrap();
        assert_eq!(december.next(), january);
    }

    #[test]
    fn years_are_bounded_to_four_digits() {
        assert!(matches!(
            MonthKey::new(i32::MAX, 1),
            Err(BudgetError::InvalidYear { year: i32::MAX })
        ));
        assert!(MonthKey::new(-1, 1).is_err());
        assert!(MonthKey::new(10000, 1).is_err());
        assert!(MonthKey::new(0, 1).is_ok());
    }

    #[test]
    fn navigation_stops_at_the_year_bounds() {
        let first = MonthKey::new(0, 1).unwrap();
        assert_eq!(first.previous(), first);
        let last = MonthKey::new(9999, 12).unwrap();
        assert_eq!(last.next(), last);
        assert_eq!(last.to_string().parse::<MonthKey>().unwrap(), last);
    }

    #[test]
    fn parses_and_displays_zero_padded() {
        let key: MonthKey = "2025-03".parse().unwrap();
        assert_eq!(key, MonthKey::new(2025, 3).unwrap());
        assert_eq!(key.to_string(), "2025-03");
        assert!("2025-3".parse::<MonthKey>().is_err());
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
    }

    #[test]
    fn contains_uses_date_components() {
        let key = MonthKey::new(2025, 1).unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    }

    #[test]
    fn serializes_as_string_key() {
        let key = MonthKey::new(2025, 1).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-01\"");
        let back: MonthKey = serde_json::from_str("\"2025-01\"").unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn label_is_human_readable() {
        assert_eq!(MonthKey::new(2025, 1).unwrap().label(), "January 2025");
    }
}
