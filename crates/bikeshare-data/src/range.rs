//! Inclusive date range used to bound the reporting window

use std::fmt;

use bikeshare_common::{format_date, BikeshareError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Date range specification, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range; fails when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BikeshareError::validation_field(
                format!("start date {start} is after end date {end}"),
                "start",
            ));
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day
    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Smallest range covering every date yielded, or `None` when empty
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |acc, date| match acc {
            None => Some(Self::single_day(date)),
            Some(range) => Some(Self {
                start: range.start.min(date),
                end: range.end.max(date),
            }),
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", format_date(self.start), format_date(self.end))
    }
}
