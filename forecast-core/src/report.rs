//! Structured form of a forecast, for callers that want records instead of text.

use serde::Serialize;

use crate::{
    format::{condition_parts, number_or_default, precipitation_percent},
    model::{ForecastCategory, RawForecastPayload, first_condition},
    time::{TimePattern, format_local, format_weekday},
};

const NO_RAIN: &str = "no rain";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub day: String,
    pub high: String,
    pub low: String,
    pub weather: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub time: String,
    pub temp: String,
    pub feels_like: String,
    pub weather: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutelyRecord {
    pub time: String,
    pub precipitation_pct: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentRecord {
    pub time: String,
    pub weather: String,
    pub description: String,
    pub rain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub event: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", content = "records", rename_all = "lowercase")]
pub enum ForecastReport {
    Daily(Vec<DailyRecord>),
    Hourly(Vec<HourlyRecord>),
    Minutely(Vec<MinutelyRecord>),
    Current(Option<CurrentRecord>),
    Alerts(Vec<AlertRecord>),
}

pub fn build_report(category: ForecastCategory, payload: &RawForecastPayload) -> ForecastReport {
    let offset = payload.offset();

    match category {
        ForecastCategory::Daily => ForecastReport::Daily(
            payload
                .daily
                .iter()
                .flatten()
                .map(|entry| {
                    let temp = entry.temp.clone().unwrap_or_default();
                    let (weather, description) = condition_parts(first_condition(&entry.weather));
                    DailyRecord {
                        day: format_weekday(entry.dt),
                        high: number_or_default(temp.max),
                        low: number_or_default(temp.min),
                        weather,
                        description,
                    }
                })
                .collect(),
        ),
        ForecastCategory::Hourly => ForecastReport::Hourly(
            payload
                .hourly
                .iter()
                .flatten()
                .map(|entry| {
                    let (weather, description) = condition_parts(first_condition(&entry.weather));
                    HourlyRecord {
                        time: format_local(entry.dt, offset, TimePattern::HourlyStamp),
                        temp: number_or_default(entry.temp),
                        feels_like: number_or_default(entry.feels_like),
                        weather,
                        description,
                    }
                })
                .collect(),
        ),
        ForecastCategory::Minutely => ForecastReport::Minutely(
            payload
                .minutely
                .iter()
                .flatten()
                .map(|entry| MinutelyRecord {
                    time: format_local(entry.dt, offset, TimePattern::ClockTime),
                    precipitation_pct: entry.precipitation.map(precipitation_percent),
                })
                .collect(),
        ),
        ForecastCategory::Current => ForecastReport::Current(payload.current.as_ref().map(|entry| {
            let (weather, description) = condition_parts(first_condition(&entry.weather));
            let rain = entry
                .rain
                .as_ref()
                .and_then(|r| r.one_hour)
                .map_or_else(|| NO_RAIN.to_string(), |mm| format!("{mm} mm/h"));
            CurrentRecord {
                time: format_local(entry.dt, offset, TimePattern::ClockTime),
                weather,
                description,
                rain,
            }
        })),
        ForecastCategory::Alerts => ForecastReport::Alerts(
            payload
                .alerts
                .iter()
                .flatten()
                .map(|alert| AlertRecord {
                    event: alert.event.clone(),
                    start: format_local(alert.start, offset, TimePattern::AlertStamp),
                    end: format_local(alert.end, offset, TimePattern::AlertStamp),
                    description: alert.description.clone(),
                })
                .collect(),
        ),
    }
}

impl ForecastReport {
    pub fn is_empty(&self) -> bool {
        match self {
            ForecastReport::Daily(r) => r.is_empty(),
            ForecastReport::Hourly(r) => r.is_empty(),
            ForecastReport::Minutely(r) => r.is_empty(),
            ForecastReport::Current(r) => r.is_none(),
            ForecastReport::Alerts(r) => r.is_empty(),
        }
    }
}
