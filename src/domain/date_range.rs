//! DateRange - Inclusive Calendar Date Range
//!
//! Every date-scoped endpoint takes `start` and `end` as `YYYY-MM-DD`, with `end`
//! not before `start`. Ranges are validated on construction so a request can never
//! carry one the backend would reject.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::constants::DATE_FORMAT;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::Invalid {
                message: "End date must be after start date".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// January 1st to December 31st of the year before `today`
    pub fn last_year(today: NaiveDate) -> Result<Self> {
        DatePreset::LastYear.range(today)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Wire value of `start`
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Wire value of `end`
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_param(), self.end_param())
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::Invalid {
        message: format!("Date must be in YYYY-MM-DD format: {value}"),
    })
}

/// Quick picks offered next to the date selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Last7Days,
    Last30Days,
    LastMonth,
    LastYear,
}

impl DatePreset {
    pub const ALL: [DatePreset; 5] = [
        DatePreset::Today,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::LastMonth,
        DatePreset::LastYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Last7Days => "Last 7 Days",
            DatePreset::Last30Days => "Last 30 Days",
            DatePreset::LastMonth => "Last Month",
            DatePreset::LastYear => "Last Year",
        }
    }

    /// Command-line name, e.g. `last-30-days`
    pub fn slug(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Last7Days => "last-7-days",
            DatePreset::Last30Days => "last-30-days",
            DatePreset::LastMonth => "last-month",
            DatePreset::LastYear => "last-year",
        }
    }

    /// Range this preset selects on `today`
    pub fn range(&self, today: NaiveDate) -> Result<DateRange> {
        let out_of_range = || Error::Invalid {
            message: format!("No {} range for {today}", self.label()),
        };

        let (start, end) = match self {
            DatePreset::Today => (today, today),
            DatePreset::Last7Days => (today.checked_sub_days(Days::new(6)).ok_or_else(out_of_range)?, today),
            DatePreset::Last30Days => (today.checked_sub_days(Days::new(29)).ok_or_else(out_of_range)?, today),
            DatePreset::LastMonth => {
                let this_month = today.with_day(1).ok_or_else(out_of_range)?;
                let start = this_month
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(out_of_range)?;
                let end = this_month.pred_opt().ok_or_else(out_of_range)?;
                (start, end)
            }
            DatePreset::LastYear => {
                let year = today.year() - 1;
                let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?;
                (start, end)
            }
        };
        DateRange::new(start, end)
    }
}

impl std::str::FromStr for DatePreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DatePreset::ALL
            .into_iter()
            .find(|preset| preset.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown date preset: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).expect("date")
    }

    #[test]
    fn test_parse_and_params() {
        let range = DateRange::parse("2024-01-01", "2024-12-31").expect("range");
        assert_eq!(range.start_param(), "2024-01-01");
        assert_eq!(range.end_param(), "2024-12-31");
        assert_eq!(range.to_string(), "2024-01-01 - 2024-12-31");
    }

    #[test]
    fn test_single_day_is_valid() {
        assert!(DateRange::parse("2024-03-05", "2024-03-05").is_ok());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(DateRange::parse("2024/01/01", "2024-12-31").is_err());
        assert!(DateRange::parse("2024-02-30", "2024-12-31").is_err());
        let err = DateRange::parse("2024-12-31", "2024-01-01").expect_err("reversed");
        assert_eq!(err.to_string(), "Invalid: End date must be after start date");
    }

    #[test]
    fn test_last_year() {
        let range = DateRange::last_year(date("2025-03-14")).expect("range");
        assert_eq!(range.start(), date("2024-01-01"));
        assert_eq!(range.end(), date("2024-12-31"));
    }

    #[test]
    fn test_presets() {
        let today = date("2025-03-14");
        let last7 = DatePreset::Last7Days.range(today).expect("range");
        assert_eq!(last7.start(), date("2025-03-08"));
        assert_eq!(last7.end(), today);

        let last30 = DatePreset::Last30Days.range(today).expect("range");
        assert_eq!(last30.start(), date("2025-02-13"));

        let last_month = DatePreset::LastMonth.range(today).expect("range");
        assert_eq!(last_month.start(), date("2025-02-01"));
        assert_eq!(last_month.end(), date("2025-02-28"));

        let january = DatePreset::LastMonth.range(date("2025-01-20")).expect("range");
        assert_eq!(january.start(), date("2024-12-01"));
        assert_eq!(january.end(), date("2024-12-31"));
    }

    #[test]
    fn test_preset_from_slug() {
        assert_eq!("last-30-days".parse::<DatePreset>().expect("preset"), DatePreset::Last30Days);
        assert_eq!("Last-Month".parse::<DatePreset>().expect("preset"), DatePreset::LastMonth);
        assert!("yesterday".parse::<DatePreset>().is_err());
    }
}
