//! Categorical domain types shared by the data, graph and dashboard crates

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BikeshareError, Result};

/// Meteorological season as encoded in the dataset (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in dataset code order
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Dataset code for this season
    pub fn code(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl TryFrom<u8> for Season {
    type Error = BikeshareError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            other => Err(BikeshareError::validation_field(
                format!("season code {other} is outside 1-4"),
                "season",
            )),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weather situation category as encoded in the dataset (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeatherSituation {
    /// Clear, few clouds, partly cloudy
    Clear,
    /// Mist with clouds
    Mist,
    /// Light snow, light rain, scattered thunderstorms
    LightPrecipitation,
    /// Heavy rain, ice pellets, snow with fog
    HeavyPrecipitation,
}

impl WeatherSituation {
    /// All situations in dataset code order
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Mist,
        WeatherSituation::LightPrecipitation,
        WeatherSituation::HeavyPrecipitation,
    ];

    /// Dataset code for this situation
    pub fn code(self) -> u8 {
        match self {
            WeatherSituation::Clear => 1,
            WeatherSituation::Mist => 2,
            WeatherSituation::LightPrecipitation => 3,
            WeatherSituation::HeavyPrecipitation => 4,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear",
            WeatherSituation::Mist => "Mist",
            WeatherSituation::LightPrecipitation => "Light Snow/Rain",
            WeatherSituation::HeavyPrecipitation => "Heavy Rain/Snow",
        }
    }
}

impl TryFrom<u8> for WeatherSituation {
    type Error = BikeshareError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(WeatherSituation::Clear),
            2 => Ok(WeatherSituation::Mist),
            3 => Ok(WeatherSituation::LightPrecipitation),
            4 => Ok(WeatherSituation::HeavyPrecipitation),
            other => Err(BikeshareError::validation_field(
                format!("weather situation code {other} is outside 1-4"),
                "weathersit",
            )),
        }
    }
}

impl fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rider category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserType {
    Casual,
    Registered,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Casual, UserType::Registered];

    pub fn name(self) -> &'static str {
        match self {
            UserType::Casual => "casual",
            UserType::Registered => "registered",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weekdays in dataset order (code 0 is Sunday)
pub const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Decode a dataset weekday code (0 = Sunday .. 6 = Saturday)
pub fn weekday_from_code(code: u8) -> Result<Weekday> {
    WEEKDAYS_FROM_SUNDAY
        .get(usize::from(code))
        .copied()
        .ok_or_else(|| {
            BikeshareError::validation_field(format!("weekday code {code} is outside 0-6"), "weekday")
        })
}

/// Calendar year for a dataset year offset (0 = 2011)
pub fn year_from_offset(offset: u8) -> Result<i32> {
    match offset {
        0 | 1 => Ok(2011 + i32::from(offset)),
        other => Err(BikeshareError::validation_field(
            format!("year offset {other} is outside 0-1"),
            "yr",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_codes_round_trip() {
        for season in Season::ALL {
            assert_eq!(Season::try_from(season.code()).unwrap(), season);
        }
        assert!(Season::try_from(0).is_err());
        assert!(Season::try_from(5).is_err());
    }

    #[test]
    fn test_weather_names() {
        assert_eq!(WeatherSituation::try_from(3).unwrap().to_string(), "Light Snow/Rain");
        assert!(WeatherSituation::try_from(9).unwrap_err().is_validation());
    }

    #[test]
    fn test_weekday_codes_start_on_sunday() {
        assert_eq!(weekday_from_code(0).unwrap(), Weekday::Sun);
        assert_eq!(weekday_from_code(6).unwrap(), Weekday::Sat);
        assert!(weekday_from_code(7).is_err());
    }

    #[test]
    fn test_year_offsets() {
        assert_eq!(year_from_offset(0).unwrap(), 2011);
        assert_eq!(year_from_offset(1).unwrap(), 2012);
        assert!(year_from_offset(2).is_err());
    }
}
