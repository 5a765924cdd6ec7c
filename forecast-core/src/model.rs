use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ForecastError;

/// Which slice of the One Call document a request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastCategory {
    Daily,
    Hourly,
    Minutely,
    Current,
    Alerts,
}

impl ForecastCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastCategory::Daily => "daily",
            ForecastCategory::Hourly => "hourly",
            ForecastCategory::Minutely => "minutely",
            ForecastCategory::Current => "current",
            ForecastCategory::Alerts => "alerts",
        }
    }

    pub const fn all() -> &'static [ForecastCategory] {
        &[
            ForecastCategory::Daily,
            ForecastCategory::Hourly,
            ForecastCategory::Minutely,
            ForecastCategory::Current,
            ForecastCategory::Alerts,
        ]
    }

    /// Categories to leave out of the upstream request.
    ///
    /// Daily and current renderings carry alerts, so `alerts` stays in for them.
    pub fn exclusions(&self) -> Vec<ForecastCategory> {
        Self::all()
            .iter()
            .copied()
            .filter(|c| *c != *self)
            .filter(|c| {
                !(*c == ForecastCategory::Alerts
                    && matches!(self, ForecastCategory::Daily | ForecastCategory::Current))
            })
            .collect()
    }
}

impl std::fmt::Display for ForecastCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ForecastCategory {
    type Error = ForecastError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "daily" => Ok(ForecastCategory::Daily),
            "hourly" => Ok(ForecastCategory::Hourly),
            "minutely" => Ok(ForecastCategory::Minutely),
            "current" => Ok(ForecastCategory::Current),
            "alerts" => Ok(ForecastCategory::Alerts),
            _ => Err(ForecastError::UnsupportedCategory(value.to_string())),
        }
    }
}

impl FromStr for ForecastCategory {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForecastCategory::try_from(s)
    }
}

/// Unit system passed through to OpenWeather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{s}'. Supported units: standard, metric, imperial."
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub zipcode: String,
    pub country_code: String,
    pub category: ForecastCategory,
}

/// Result of the zip geocoding endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One Call document as returned upstream. Every collection is optional since
/// the request excludes the ones it does not need.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastPayload {
    pub timezone_offset: Option<i64>,
    pub daily: Option<Vec<DailyEntry>>,
    pub hourly: Option<Vec<HourlyEntry>>,
    pub minutely: Option<Vec<MinutelyEntry>>,
    pub current: Option<CurrentEntry>,
    pub alerts: Option<Vec<AlertEntry>>,
}

impl RawForecastPayload {
    pub fn offset(&self) -> i64 {
        self.timezone_offset.unwrap_or(0)
    }

    /// Drop the collections an upstream request with these exclusions would omit.
    pub fn without(mut self, excluded: &[ForecastCategory]) -> Self {
        for category in excluded {
            match category {
                ForecastCategory::Daily => self.daily = None,
                ForecastCategory::Hourly => self.hourly = None,
                ForecastCategory::Minutely => self.minutely = None,
                ForecastCategory::Current => self.current = None,
                ForecastCategory::Alerts => self.alerts = None,
            }
        }
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherCondition {
    pub main: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyTemp {
    pub max: Option<f64>,
    pub min: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyEntry {
    pub dt: i64,
    pub temp: Option<DailyTemp>,
    pub weather: Option<Vec<WeatherCondition>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyEntry {
    pub dt: i64,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub weather: Option<Vec<WeatherCondition>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinutelyEntry {
    pub dt: i64,
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rain {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentEntry {
    pub dt: i64,
    pub weather: Option<Vec<WeatherCondition>>,
    pub rain: Option<Rain>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertEntry {
    pub start: i64,
    pub end: i64,
    pub event: String,
    pub description: String,
}

/// First element of an optional condition list, if any.
pub fn first_condition(weather: &Option<Vec<WeatherCondition>>) -> Option<&WeatherCondition> {
    weather.as_ref().and_then(|w| w.first())
}
