//! Report period and the shared period filter
//!
//! Every monthly report takes a [`ReportPeriod`]; annual reports take a bare
//! year. Both filters treat an absent date as "not in the period".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month selected for reporting (month is 1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for ReportPeriod {
    type Error = PeriodParseError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        if !(1..=12).contains(&raw.month) {
            return Err(PeriodParseError::InvalidMonth(raw.month));
        }
        Ok(Self {
            year: raw.year,
            month: raw.month,
        })
    }
}

impl ReportPeriod {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Create a monthly period
    ///
    /// # Panics
    ///
    /// Panics if `month` is not in `1..=12`; use [`ReportPeriod::parse`] for
    /// untrusted input.
    pub fn monthly(year: i32, month: u32) -> Self {
        assert!((1..=12).contains(&month), "month out of range: {}", month);
        Self { year, month }
    }

    /// The month containing `today`
    pub fn current(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Does `date` fall inside this month? Absent dates never do.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        date.map(|d| d.year() == self.year && d.month() == self.month)
            .unwrap_or(false)
    }

    /// The `YYYY-MM` token used by card billing references
    pub fn payment_reference(&self) -> String {
        self.to_string()
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        if self.month == 12 {
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

    /// Get the previous period
    pub fn prev(&self) -> Self {
        if self.month == 1 {
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

    /// Parse a `YYYY-MM` period string
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Ok(Self { year, month })
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Does `date` fall inside calendar year `year`? Absent dates never do.
pub fn in_year(date: Option<NaiveDate>, year: i32) -> bool {
    date.map(|d| d.year() == year).unwrap_or(false)
}

/// The `YYYY-MM` tokens of every month in `year`, January first
pub fn month_tokens(year: i32) -> Vec<String> {
    (1..=12)
        .map(|month| ReportPeriod { year, month }.to_string())
        .collect()
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_contains() {
        let march = ReportPeriod::monthly(2024, 3);
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 4, 1)));
        assert!(!march.contains(date(2023, 3, 15)));
        assert!(!march.contains(None));
    }

    #[test]
    fn test_in_year() {
        assert!(in_year(date(2024, 12, 31), 2024));
        assert!(!in_year(date(2025, 1, 1), 2024));
        assert!(!in_year(None, 2024));
    }

    #[test]
    fn test_payment_reference_is_zero_padded() {
        assert_eq!(ReportPeriod::monthly(2024, 5).payment_reference(), "2024-05");
        assert_eq!(ReportPeriod::monthly(2024, 11).payment_reference(), "2024-11");
    }

    #[test]
    fn test_next_prev_wrap_years() {
        let dec = ReportPeriod::monthly(2024, 12);
        assert_eq!(dec.next(), ReportPeriod::monthly(2025, 1));
        assert_eq!(ReportPeriod::monthly(2025, 1).prev(), dec);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            ReportPeriod::parse("2024-03").unwrap(),
            ReportPeriod::monthly(2024, 3)
        );
        assert_eq!(
            ReportPeriod::parse("2024-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(ReportPeriod::parse("March 2024").is_err());
    }

    #[test]
    fn test_month_tokens() {
        let tokens = month_tokens(2024);
        assert_eq!(tokens.len(), 12);
        assert_eq!(tokens[0], "2024-01");
        assert_eq!(tokens[11], "2024-12");
    }

    #[test]
    fn test_current() {
        let p = ReportPeriod::current(NaiveDate::from_ymd_opt(2024, 8, 19).unwrap());
        assert_eq!(p, ReportPeriod::monthly(2024, 8));
    }

    #[test]
    fn test_deserialize_validates_month() {
        let period: ReportPeriod = serde_json::from_str(r#"{"year":2024,"month":3}"#).unwrap();
        assert_eq!(period, ReportPeriod::monthly(2024, 3));
        assert_eq!(period.month(), 3);
        assert_eq!(period.year(), 2024);

        assert!(serde_json::from_str::<ReportPeriod>(r#"{"year":2024,"month":13}"#).is_err());
        assert!(serde_json::from_str::<ReportPeriod>(r#"{"year":2024,"month":0}"#).is_err());
    }
}
