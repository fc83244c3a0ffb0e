//! Headline user metrics

use bikeshare_common::UserType;
use bikeshare_data::RentalRecord;
use serde::Serialize;

/// Casual, registered and total rentals over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserMetrics {
    pub casual: u64,
    pub registered: u64,
    /// Always `casual + registered`
    pub total: u64,
}

impl UserMetrics {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        let (casual, registered) = records
            .into_iter()
            .fold((0u64, 0u64), |(c, r), record| {
                (c.saturating_add(record.casual), r.saturating_add(record.registered))
            });
        Self {
            casual,
            registered,
            total: casual.saturating_add(registered),
        }
    }

    pub fn count(&self, user: UserType) -> u64 {
        match user {
            UserType::Casual => self.casual,
            UserType::Registered => self.registered,
        }
    }

    /// Fraction of the total taken by `user`, zero when there are no rentals
    pub fn share(&self, user: UserType) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let share = self.count(user) as f64 / self.total as f64;
        share
    }
}

/// User metrics split by the holiday flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HolidayMetrics {
    pub holiday: UserMetrics,
    pub non_holiday: UserMetrics,
}

impl HolidayMetrics {
    pub fn from_records(records: &[RentalRecord]) -> Self {
        Self {
            holiday: UserMetrics::from_records(records.iter().filter(|r| r.holiday)),
            non_holiday: UserMetrics::from_records(records.iter().filter(|r| !r.holiday)),
        }
    }
}
