//! Rental record model and row validation

use bikeshare_common::{
    weekday_from_code, year_from_offset, BikeshareError, Result, Season, WeatherSituation,
};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Which dataset table a row comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    /// One row per day (`main_day.csv`)
    Daily,
    /// One row per day and hour (`main_hour.csv`)
    Hourly,
}

impl TableKind {
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Daily => "daily",
            TableKind::Hourly => "hourly",
        }
    }
}

/// A validated rental row.
///
/// Environmental readings stay normalized to `[0, 1]`; they are scaled back
/// to real units only when bucketized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    /// Hour of day, present for hourly rows only
    pub hour: Option<u8>,
    pub season: Season,
    /// Calendar year (2011 or 2012)
    pub year: i32,
    /// Month of year, 1-12
    pub month: u32,
    pub holiday: bool,
    pub weekday: Weekday,
    pub workingday: bool,
    pub weather: WeatherSituation,
    /// Normalized temperature
    pub temp: f64,
    /// Normalized feeling temperature
    pub atemp: f64,
    /// Normalized humidity
    pub humidity: f64,
    /// Normalized windspeed
    pub windspeed: f64,
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

/// Row as it appears in the CSV; unknown columns are ignored
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRow {
    pub dteday: NaiveDate,
    pub season: u8,
    pub yr: u8,
    pub mnth: u8,
    #[serde(default)]
    pub hr: Option<u8>,
    pub holiday: u8,
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl RawRow {
    /// Decode the categorical codes and check every row invariant
    pub(crate) fn into_record(self, kind: TableKind) -> Result<RentalRecord> {
        let hour = match (kind, self.hr) {
            (TableKind::Daily, _) => None,
            (TableKind::Hourly, Some(hr)) if hr <= 23 => Some(hr),
            (TableKind::Hourly, Some(hr)) => {
                return Err(BikeshareError::validation_field(
                    format!("hour {hr} is outside 0-23"),
                    "hr",
                ))
            }
            (TableKind::Hourly, None) => {
                return Err(BikeshareError::validation_field(
                    "hourly row is missing the hour",
                    "hr",
                ))
            }
        };

        if !(1..=12).contains(&self.mnth) {
            return Err(BikeshareError::validation_field(
                format!("month {} is outside 1-12", self.mnth),
                "mnth",
            ));
        }

        let readings = [
            ("temp", self.temp),
            ("atemp", self.atemp),
            ("hum", self.hum),
            ("windspeed", self.windspeed),
        ];
        for (field, value) in readings {
            if !(0.0..=1.0).contains(&value) {
                return Err(BikeshareError::validation_field(
                    format!("{field} reading {value} is outside [0, 1]"),
                    field,
                ));
            }
        }

        if self.casual.checked_add(self.registered) != Some(self.cnt) {
            return Err(BikeshareError::validation_field(
                format!(
                    "cnt {} does not equal casual {} + registered {}",
                    self.cnt, self.casual, self.registered
                ),
                "cnt",
            ));
        }

        Ok(RentalRecord {
            date: self.dteday,
            hour,
            season: Season::try_from(self.season)?,
            year: year_from_offset(self.yr)?,
            month: u32::from(self.mnth),
            holiday: decode_flag(self.holiday, "holiday")?,
            weekday: weekday_from_code(self.weekday)?,
            workingday: decode_flag(self.workingday, "workingday")?,
            weather: WeatherSituation::try_from(self.weathersit)?,
            temp: self.temp,
            atemp: self.atemp,
            humidity: self.hum,
            windspeed: self.windspeed,
            casual: self.casual,
            registered: self.registered,
            total: self.cnt,
        })
    }
}

fn decode_flag(value: u8, field: &str) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(BikeshareError::validation_field(
            format!("{field} flag {other} is not 0 or 1"),
            field,
        )),
    }
}
