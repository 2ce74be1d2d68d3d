//! Dashboard - Headline Metrics and Trend Interval

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date_range::DateRange;
use crate::error::{Error, Result};

/// Headline metrics with their change against the previous period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_shipments: f64,
    pub active_vehicles: f64,
    pub total_revenue: f64,
    pub avg_delivery_time: f64,
    pub shipment_trend: f64,
    pub vehicle_trend: f64,
    pub revenue_trend: f64,
    pub delivery_time_trend: f64,
}

/// Granularity of the dashboard trend comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendInterval {
    #[default]
    Week,
    Month,
    Year,
}

impl TrendInterval {
    /// Selectable range of `periods_back`
    pub const MAX_PERIODS_BACK: u32 = 12;

    /// Wire value (`interval_type`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendInterval::Week => "week",
            TrendInterval::Month => "month",
            TrendInterval::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendInterval::Week => "Weekly",
            TrendInterval::Month => "Monthly",
            TrendInterval::Year => "Yearly",
        }
    }

    /// The whole calendar period `periods_back` periods before the one containing `today`.
    ///
    /// Weeks start on Sunday.
    pub fn range(&self, today: NaiveDate, periods_back: u32) -> Result<DateRange> {
        let out_of_range = || Error::Invalid {
            message: format!("No {} range {periods_back} periods before {today}", self.as_str()),
        };

        let (start, end) = match self {
            TrendInterval::Week => {
                let into_week = u64::from(today.weekday().num_days_from_sunday());
                let back = u64::from(periods_back) * 7;
                let start = today
                    .checked_sub_days(Days::new(into_week + back))
                    .ok_or_else(out_of_range)?;
                let end = start.checked_add_days(Days::new(6)).ok_or_else(out_of_range)?;
                (start, end)
            }
            TrendInterval::Month => {
                let start = today
                    .with_day(1)
                    .and_then(|d| d.checked_sub_months(Months::new(periods_back)))
                    .ok_or_else(out_of_range)?;
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.pred_opt())
                    .ok_or_else(out_of_range)?;
                (start, end)
            }
            TrendInterval::Year => {
                let year = today.year() - i32::try_from(periods_back).map_err(|_| out_of_range())?;
                let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?;
                (start, end)
            }
        };
        DateRange::new(start, end)
    }
}

impl std::str::FromStr for TrendInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(TrendInterval::Week),
            "month" => Ok(TrendInterval::Month),
            "year" => Ok(TrendInterval::Year),
            other => Err(Error::Invalid {
                message: format!("Unknown trend interval: {other}"),
            }),
        }
    }
}

/// Parameters of one dashboard request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardQuery {
    pub range: DateRange,
    pub interval: TrendInterval,
    pub periods_back: u32,
}

impl DashboardQuery {
    /// Query for the selected interval, with the range derived from `today`
    pub fn for_interval(interval: TrendInterval, periods_back: u32, today: NaiveDate) -> Result<Self> {
        if !(1..=TrendInterval::MAX_PERIODS_BACK).contains(&periods_back) {
            return Err(Error::Invalid {
                message: format!(
                    "periods_back must be between 1 and {}",
                    TrendInterval::MAX_PERIODS_BACK
                ),
            });
        }
        Ok(Self {
            range: interval.range(today, periods_back)?,
            interval,
            periods_back,
        })
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.range.start_param()),
            ("end", self.range.end_param()),
            ("interval_type", self.interval.as_str().to_string()),
            ("periods_back", self.periods_back.to_string()),
        ]
    }
}
