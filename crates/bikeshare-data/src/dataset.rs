//! Immutable dataset snapshot shared by every aggregation

use std::path::Path;
use std::sync::Arc;

use bikeshare_common::Result;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::loader::{load_daily, load_hourly};
use crate::range::DateRange;
use crate::record::RentalRecord;

/// Daily and hourly tables held as shared, read-only slices.
///
/// Cloning is cheap; filtering produces a new snapshot and never touches
/// the original.
#[derive(Debug, Clone)]
pub struct Dataset {
    daily: Arc<[RentalRecord]>,
    hourly: Arc<[RentalRecord]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Dataset {
    pub fn new(daily: Vec<RentalRecord>, hourly: Vec<RentalRecord>) -> Self {
        Self {
            daily: daily.into(),
            hourly: hourly.into(),
        }
    }

    /// Load both tables from CSV files
    #[instrument(skip_all, fields(day = %day_path.as_ref().display(), hour = %hour_path.as_ref().display()))]
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(day_path: P, hour_path: Q) -> Result<Self> {
        let daily = load_daily(day_path.as_ref())?;
        let hourly = load_hourly(hour_path.as_ref())?;
        let dataset = Self::new(daily, hourly);
        match dataset.span() {
            Some(span) => info!(%span, "Dataset ready"),
            None => info!("Dataset ready but the daily table is empty"),
        }
        Ok(dataset)
    }

    pub fn daily(&self) -> &[RentalRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[RentalRecord] {
        &self.hourly
    }

    /// True when both tables have no rows
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }

    /// First and last date of the daily table
    pub fn span(&self) -> Option<DateRange> {
        DateRange::spanning(self.daily.iter().map(|r| r.date))
    }

    /// Resolve optional bounds against the data span.
    ///
    /// A missing bound defaults to the matching end of the span. Returns
    /// `None` only when a bound is missing and the daily table is empty.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<DateRange>> {
        let span = self.span();
        let start = start.or_else(|| span.map(|s| s.start()));
        let end = end.or_else(|| span.map(|s| s.end()));
        match (start, end) {
            (Some(start), Some(end)) => DateRange::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    /// Snapshot with both tables bounded to `range`
    pub fn filter(&self, range: &DateRange) -> Dataset {
        let pick = |rows: &[RentalRecord]| -> Arc<[RentalRecord]> {
            rows.iter()
                .filter(|r| range.contains(r.date))
                .cloned()
                .collect()
        };
        let filtered = Self {
            daily: pick(&self.daily),
            hourly: pick(&self.hourly),
        };
        debug!(
            %range,
            daily = filtered.daily.len(),
            hourly = filtered.hourly.len(),
            "Filtered dataset"
        );
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_common::test_utils::{create_temp_dir, write_sample_datasets};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Dataset {
        let dir = create_temp_dir();
        let (day, hour) = write_sample_datasets(dir.path());
        Dataset::load(day, hour).unwrap()
    }

    #[test]
    fn test_span_of_sample() {
        let span = sample().span().unwrap();
        assert_eq!(span.start(), date(2011, 1, 1));
        assert_eq!(span.end(), date(2012, 12, 31));
        assert_eq!(Dataset::default().span(), None);
    }

    #[test]
    fn test_filter_bounds_both_tables() {
        let dataset = sample();
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 3)).unwrap();
        let filtered = dataset.filter(&range);

        assert_eq!(filtered.daily().len(), 3);
        assert_eq!(filtered.hourly().len(), 5);
        assert!(filtered.daily().iter().all(|r| range.contains(r.date)));
        // The original snapshot is untouched
        assert_eq!(dataset.daily().len(), 8);
    }

    #[test]
    fn test_filter_outside_data_is_empty() {
        let range = DateRange::new(date(2015, 1, 1), date(2015, 12, 31)).unwrap();
        let filtered = sample().filter(&range);
        assert!(filtered.is_empty());
        assert_eq!(filtered.span(), None);
    }

    #[test]
    fn test_resolve_range_defaults_to_span() {
        let dataset = sample();
        let range = dataset.resolve_range(None, None).unwrap().unwrap();
        assert_eq!(Some(range), dataset.span());

        let range = dataset.resolve_range(Some(date(2012, 1, 1)), None).unwrap().unwrap();
        assert_eq!(range.end(), date(2012, 12, 31));

        assert!(dataset.resolve_range(Some(date(2013, 1, 1)), None).is_err());
        assert_eq!(Dataset::default().resolve_range(None, None).unwrap(), None);
    }
}
