//! Group-by aggregations over rental records.
//!
//! Categorical groupings are zero-filled over their full domain and returned
//! in domain order, so an empty date range yields zeros rather than missing
//! categories.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use bikeshare_common::{
    month_abbrev, weekday_name, Season, WeatherSituation, WEEKDAYS_FROM_SUNDAY,
};
use bikeshare_data::RentalRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Hours of the day in the hourly table
pub const HOURS: std::ops::RangeInclusive<u8> = 0..=23;

/// Months of the year
pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

/// Total rentals for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: u64,
}

/// Casual and registered rentals for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSplit {
    pub label: String,
    pub casual: u64,
    pub registered: u64,
}

/// One point of a numeric series; `x` orders the points, `label` names them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub label: String,
    pub value: f64,
}

/// A series restricted to one calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    pub year: i32,
    pub points: Vec<SeriesPoint>,
}

/// Rentals summed over one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// First day of the month
    pub month: NaiveDate,
    pub label: String,
    pub total: u64,
}

/// Sum `value` per key, in `domain` order, with zeros for absent keys
fn group_sum<K, F, V>(records: &[RentalRecord], domain: &[K], key: F, value: V) -> Vec<(K, u64)>
where
    K: Copy + Eq + Hash,
    F: Fn(&RentalRecord) -> Option<K>,
    V: Fn(&RentalRecord) -> u64,
{
    let mut sums: HashMap<K, u64> = HashMap::with_capacity(domain.len());
    for record in records {
        if let Some(k) = key(record) {
            *sums.entry(k).or_insert(0) += value(record);
        }
    }
    domain
        .iter()
        .map(|k| (*k, sums.get(k).copied().unwrap_or(0)))
        .collect()
}

fn totals<K, F, L>(records: &[RentalRecord], domain: &[K], key: F, label: L) -> Vec<CategoryTotal>
where
    K: Copy + Eq + Hash,
    F: Fn(&RentalRecord) -> Option<K>,
    L: Fn(K) -> String,
{
    group_sum(records, domain, key, |r| r.total)
        .into_iter()
        .map(|(k, total)| CategoryTotal { label: label(k), total })
        .collect()
}

fn splits<K, F, L>(records: &[RentalRecord], domain: &[K], key: F, label: L) -> Vec<UserSplit>
where
    K: Copy + Eq + Hash,
    F: Fn(&RentalRecord) -> Option<K>,
    L: Fn(K) -> String,
{
    let casual = group_sum(records, domain, &key, |r| r.casual);
    let registered = group_sum(records, domain, &key, |r| r.registered);
    casual
        .into_iter()
        .zip(registered)
        .map(|((k, casual), (_, registered))| UserSplit {
            label: label(k),
            casual,
            registered,
        })
        .collect()
}

fn month_label(month: u32) -> String {
    month_abbrev(month).unwrap_or_default().to_string()
}

fn holiday_label(holiday: bool) -> String {
    let label = if holiday { "Holiday" } else { "Non-Holiday" };
    label.to_string()
}

fn workingday_label(workingday: bool) -> String {
    let label = if workingday { "Working Day" } else { "Non-Working Day" };
    label.to_string()
}

fn months() -> Vec<u32> {
    MONTHS.collect()
}

fn hours() -> Vec<u8> {
    HOURS.collect()
}

/// Total rentals per season
pub fn total_by_season(days: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(days, &Season::ALL, |r| Some(r.season), |s| s.name().to_string())
}

/// Total rentals per weekday, Sunday first
pub fn total_by_weekday(days: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(days, &WEEKDAYS_FROM_SUNDAY, |r| Some(r.weekday), |d| {
        weekday_name(d).to_string()
    })
}

/// Total rentals per month of year
pub fn total_by_month(days: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(days, &months(), |r| Some(r.month), month_label)
}

/// Total rentals per weather situation
pub fn total_by_weather(days: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(days, &WeatherSituation::ALL, |r| Some(r.weather), |w| {
        w.name().to_string()
    })
}

/// Total rentals on non-holidays and holidays, in that order
pub fn total_by_holiday(days: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(days, &[false, true], |r| Some(r.holiday), holiday_label)
}

/// Total rentals on non-working and working days, in that order
pub fn total_by_workingday(days: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(days, &[false, true], |r| Some(r.workingday), workingday_label)
}

/// Total rentals per hour of day from the hourly table
pub fn total_by_hour(hours_table: &[RentalRecord]) -> Vec<CategoryTotal> {
    totals(hours_table, &hours(), |r| r.hour, |h| h.to_string())
}

/// Casual and registered rentals per hour of day
pub fn users_by_hour(hours_table: &[RentalRecord]) -> Vec<UserSplit> {
    splits(hours_table, &hours(), |r| r.hour, |h| h.to_string())
}

/// Casual and registered rentals per weekday, Sunday first
pub fn users_by_weekday(days: &[RentalRecord]) -> Vec<UserSplit> {
    splits(days, &WEEKDAYS_FROM_SUNDAY, |r| Some(r.weekday), |d| {
        weekday_name(d).to_string()
    })
}

/// Casual and registered rentals per month of year
pub fn users_by_month(days: &[RentalRecord]) -> Vec<UserSplit> {
    splits(days, &months(), |r| Some(r.month), month_label)
}

/// Casual and registered rentals on non-holidays and holidays
pub fn users_by_holiday(days: &[RentalRecord]) -> Vec<UserSplit> {
    splits(days, &[false, true], |r| Some(r.holiday), holiday_label)
}

/// Daily totals, one series per calendar year
pub fn daily_series_by_year(days: &[RentalRecord]) -> Vec<YearSeries> {
    let mut by_year: BTreeMap<i32, BTreeMap<NaiveDate, u64>> = BTreeMap::new();
    for record in days {
        *by_year
            .entry(record.year)
            .or_default()
            .entry(record.date)
            .or_insert(0) += record.total;
    }

    by_year
        .into_iter()
        .map(|(year, dates)| YearSeries {
            year,
            points: dates
                .into_iter()
                .map(|(date, total)| {
                    #[allow(clippy::cast_precision_loss)]
                    let value = total as f64;
                    SeriesPoint {
                        x: f64::from(date.num_days_from_ce()),
                        label: date.format("%Y-%m-%d").to_string(),
                        value,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Mean of the row totals per key and year; keys without rows are skipped
fn mean_by_year<K, F, X, L>(
    records: &[RentalRecord],
    domain: &[K],
    key: F,
    x: X,
    label: L,
) -> Vec<YearSeries>
where
    K: Copy + Eq + Hash,
    F: Fn(&RentalRecord) -> Option<K>,
    X: Fn(K) -> f64,
    L: Fn(K) -> String,
{
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    years
        .into_iter()
        .map(|year| {
            let mut acc: HashMap<K, (u64, u64)> = HashMap::new();
            for record in records.iter().filter(|r| r.year == year) {
                if let Some(k) = key(record) {
                    let entry = acc.entry(k).or_insert((0, 0));
                    entry.0 += record.total;
                    entry.1 += 1;
                }
            }
            let points = domain
                .iter()
                .filter_map(|k| {
                    let (sum, rows) = acc.get(k).copied()?;
                    #[allow(clippy::cast_precision_loss)]
                    let value = sum as f64 / rows as f64;
                    Some(SeriesPoint {
                        x: x(*k),
                        label: label(*k),
                        value,
                    })
                })
                .collect();
            YearSeries { year, points }
        })
        .collect()
}

/// Mean daily rentals per month, one series per year
pub fn monthly_mean_by_year(days: &[RentalRecord]) -> Vec<YearSeries> {
    mean_by_year(days, &months(), |r| Some(r.month), f64::from, month_label)
}

/// Mean hourly rentals per hour of day, one series per year
pub fn hourly_mean_by_year(hours_table: &[RentalRecord]) -> Vec<YearSeries> {
    mean_by_year(hours_table, &hours(), |r| r.hour, f64::from, |h| h.to_string())
}

/// Rentals summed per calendar month, oldest first
pub fn monthly_timeline(days: &[RentalRecord]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in days {
        if let Some(first) = record.date.with_day(1) {
            *by_month.entry(first).or_insert(0) += record.total;
        }
    }
    by_month
        .into_iter()
        .map(|(month, total)| MonthlyTotal {
            month,
            label: month.format("%b %Y").to_string(),
            total,
        })
        .collect()
}
