//! Environmental factors and their bucketed rental totals

use bikeshare_common::Result;
use bikeshare_config::ScaleConfig;
use bikeshare_data::RentalRecord;
use serde::Serialize;
use tracing::debug;

use crate::bucketizer::{bucketize, Bucket};

/// Normalized environmental reading carried by every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalFactor {
    Temperature,
    FeelingTemperature,
    Humidity,
    Windspeed,
}

impl EnvironmentalFactor {
    pub const ALL: [EnvironmentalFactor; 4] = [
        EnvironmentalFactor::Temperature,
        EnvironmentalFactor::FeelingTemperature,
        EnvironmentalFactor::Humidity,
        EnvironmentalFactor::Windspeed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnvironmentalFactor::Temperature => "Temperature",
            EnvironmentalFactor::FeelingTemperature => "Feeling Temperature",
            EnvironmentalFactor::Humidity => "Humidity",
            EnvironmentalFactor::Windspeed => "Windspeed",
        }
    }

    /// Display unit of the scaled reading
    pub fn unit(self) -> &'static str {
        match self {
            EnvironmentalFactor::Temperature | EnvironmentalFactor::FeelingTemperature => "Celsius",
            EnvironmentalFactor::Humidity => "%",
            EnvironmentalFactor::Windspeed => "km/h",
        }
    }

    /// Normalized reading of this factor on a record
    pub fn reading(self, record: &RentalRecord) -> f64 {
        match self {
            EnvironmentalFactor::Temperature => record.temp,
            EnvironmentalFactor::FeelingTemperature => record.atemp,
            EnvironmentalFactor::Humidity => record.humidity,
            EnvironmentalFactor::Windspeed => record.windspeed,
        }
    }

    /// Real-world maximum configured for this factor
    pub fn scale(self, scales: &ScaleConfig) -> f64 {
        match self {
            EnvironmentalFactor::Temperature => scales.temperature,
            EnvironmentalFactor::FeelingTemperature => scales.feeling_temperature,
            EnvironmentalFactor::Humidity => scales.humidity,
            EnvironmentalFactor::Windspeed => scales.windspeed,
        }
    }
}

/// Total rentals per factor bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorBuckets {
    pub factor: EnvironmentalFactor,
    pub unit: &'static str,
    pub scale: f64,
    pub buckets: Vec<Bucket>,
}

/// Bucketize the record totals by one environmental factor
pub fn bucketize_factor(
    records: &[RentalRecord],
    factor: EnvironmentalFactor,
    scale: f64,
) -> Result<FactorBuckets> {
    let buckets = bucketize(records.iter().map(|r| (factor.reading(r), r.total)), scale)?;
    debug!(factor = factor.name(), rows = records.len(), "Bucketized factor");
    Ok(FactorBuckets {
        factor,
        unit: factor.unit(),
        scale,
        buckets,
    })
}

/// Bucketize every factor with its configured scale
pub fn bucketize_all(records: &[RentalRecord], scales: &ScaleConfig) -> Result<Vec<FactorBuckets>> {
    EnvironmentalFactor::ALL
        .iter()
        .map(|&factor| bucketize_factor(records, factor, factor.scale(scales)))
        .collect()
}
