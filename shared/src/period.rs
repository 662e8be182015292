//! Period resolution: turning a filter mode and a reference date into the
//! inclusive date range sent to the backend listing endpoint.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which slice of time the expense listing is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFilter {
    Day,
    Week,
    Month,
    All,
}

/// Inclusive calendar-date bounds for a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("unknown period filter: {0:?}")]
    UnknownMode(String),
}

impl PeriodFilter {
    pub const ALL_MODES: [PeriodFilter; 4] = [
        PeriodFilter::Day,
        PeriodFilter::Week,
        PeriodFilter::Month,
        PeriodFilter::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodFilter::Day => "day",
            PeriodFilter::Week => "week",
            PeriodFilter::Month => "month",
            PeriodFilter::All => "all",
        }
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodFilter {
    type Err = PeriodError;

    /// Unknown modes are a configuration error, never a silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(PeriodFilter::Day),
            "week" => Ok(PeriodFilter::Week),
            "month" => Ok(PeriodFilter::Month),
            "all" => Ok(PeriodFilter::All),
            other => Err(PeriodError::UnknownMode(other.to_string())),
        }
    }
}

/// Resolves a filter mode against a reference date.
///
/// Returns `None` for [`PeriodFilter::All`]: no date constraint is sent.
///
/// `Week` is the Sunday-to-Saturday week containing `reference`. Anchoring
/// to the reference date (rather than to today) keeps the mode consistent
/// with `Day` and `Month`, which both follow the selected date.
pub fn resolve(filter: PeriodFilter, reference: NaiveDate) -> Option<DateRange> {
    match filter {
        PeriodFilter::Day => Some(DateRange {
            start: reference,
            end: reference,
        }),
        PeriodFilter::Week => {
            let days_from_sunday = reference.weekday().num_days_from_sunday() as u64;
            let sunday = reference - Days::new(days_from_sunday);
            Some(DateRange {
                start: sunday,
                end: sunday + Days::new(6),
            })
        }
        PeriodFilter::Month => {
            let start = reference.with_day(1)?;
            let next_month = if reference.month() == 12 {
                NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)
            }?;
            Some(DateRange {
                start,
                end: next_month - Days::new(1),
            })
        }
        PeriodFilter::All => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_resolves_to_single_date_range() {
        let d = date(2024, 6, 15);
        assert_eq!(
            resolve(PeriodFilter::Day, d),
            Some(DateRange { start: d, end: d })
        );
    }

    #[test]
    fn week_is_sunday_through_saturday_of_reference_date() {
        // 2024-06-12 is a Wednesday; its week is Jun 9 (Sun) - Jun 15 (Sat).
        let range = resolve(PeriodFilter::Week, date(2024, 6, 12)).unwrap();
        assert_eq!(range.start, date(2024, 6, 9));
        assert_eq!(range.end, date(2024, 6, 15));
    }

    #[test]
    fn week_of_a_sunday_starts_on_that_sunday() {
        let range = resolve(PeriodFilter::Week, date(2024, 6, 9)).unwrap();
        assert_eq!(range.start, date(2024, 6, 9));
        assert_eq!(range.end, date(2024, 6, 15));
    }

    #[test]
    fn week_range_can_span_a_month_boundary() {
        // 2024-07-02 is a Tuesday; the week runs Jun 30 - Jul 6.
        let range = resolve(PeriodFilter::Week, date(2024, 7, 2)).unwrap();
        assert_eq!(range.start, date(2024, 6, 30));
        assert_eq!(range.end, date(2024, 7, 6));
    }

    #[test]
    fn month_handles_leap_february() {
        let range = resolve(PeriodFilter::Month, date(2024, 2, 15)).unwrap();
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 29));
    }

    #[test]
    fn month_handles_common_february() {
        let range = resolve(PeriodFilter::Month, date(2023, 2, 15)).unwrap();
        assert_eq!(range.start, date(2023, 2, 1));
        assert_eq!(range.end, date(2023, 2, 28));
    }

    #[test]
    fn month_handles_december() {
        let range = resolve(PeriodFilter::Month, date(2023, 12, 25)).unwrap();
        assert_eq!(range.start, date(2023, 12, 1));
        assert_eq!(range.end, date(2023, 12, 31));
    }

    #[test]
    fn all_sends_no_date_constraint() {
        assert_eq!(resolve(PeriodFilter::All, date(2024, 1, 1)), None);
    }

    #[test]
    fn parses_known_modes_and_rejects_unknown() {
        assert_eq!("day".parse::<PeriodFilter>().unwrap(), PeriodFilter::Day);
        assert_eq!("week".parse::<PeriodFilter>().unwrap(), PeriodFilter::Week);
        assert_eq!("month".parse::<PeriodFilter>().unwrap(), PeriodFilter::Month);
        assert_eq!("all".parse::<PeriodFilter>().unwrap(), PeriodFilter::All);
        assert_eq!(
            "year".parse::<PeriodFilter>(),
            Err(PeriodError::UnknownMode("year".to_string()))
        );
    }
}
