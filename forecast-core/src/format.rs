//! Text rendering of One Call payloads, one parser per forecast category.
//!
//! Every parser is pure. Missing leaf fields fall back to fixed defaults and a
//! missing collection renders [`NO_DATA`]; the final text is always passed
//! through [`cap_length`].

use crate::{
    model::{
        AlertEntry, CurrentEntry, DailyEntry, ForecastCategory, HourlyEntry, MinutelyEntry,
        RawForecastPayload, WeatherCondition, first_condition,
    },
    time::{
        MAX_MINUTELY_LENGTH, MAX_RESPONSE_LENGTH, TimePattern, cap_length, format_local,
        format_weekday,
    },
};

pub const NO_DATA: &str = "**no data available**";
pub const NO_ALERTS: &str = "There are no alerts for your area at this moment.";
pub const MINUTELY_DISCLAIMER: &str = "*Minute forecast does not give you weather alerts!*";

pub(crate) const MISSING_FIELD: &str = "No Data";

pub(crate) fn number_or_default(value: Option<f64>) -> String {
    // -0.0 prints as "-0"; show it as plain 0.
    value.map_or_else(
        || MISSING_FIELD.to_string(),
        |v| if v == 0.0 { 0.0_f64.to_string() } else { v.to_string() },
    )
}

pub(crate) fn condition_parts(condition: Option<&WeatherCondition>) -> (String, String) {
    let main = condition
        .and_then(|c| c.main.clone())
        .unwrap_or_else(|| MISSING_FIELD.to_string());
    let description = condition.and_then(|c| c.description.clone()).unwrap_or_default();
    (main, description)
}

/// Precipitation fraction in `[0, 1]` as a whole percentage, half away from zero.
pub fn precipitation_percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

pub fn parse_daily(
    entries: Option<&[DailyEntry]>,
    alerts: Option<&[AlertEntry]>,
    timezone_offset: i64,
) -> String {
    let Some(entries) = entries else {
        return NO_DATA.to_string();
    };

    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| {
            let (high, low) = match &entry.temp {
                Some(temp) => (number_or_default(temp.max), number_or_default(temp.min)),
                None => (MISSING_FIELD.to_string(), MISSING_FIELD.to_string()),
            };
            let (main, description) = condition_parts(first_condition(&entry.weather));

            format!(
                "**{}**\nHigh: {high}\nLow: {low}\nWeather: {main} - {description}\n",
                format_weekday(entry.dt)
            )
        })
        .collect();

    let text = with_alerts(blocks.join("\n"), alerts, timezone_offset);
    cap_length(&text, MAX_RESPONSE_LENGTH)
}

pub fn parse_hourly(entries: Option<&[HourlyEntry]>, timezone_offset: i64) -> String {
    let Some(entries) = entries else {
        return NO_DATA.to_string();
    };

    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| {
            let (main, description) = condition_parts(first_condition(&entry.weather));

            format!(
                "**{}**\nTemp: {}\nFeels Like: {}\n{main} - {description}\n",
                format_local(entry.dt, timezone_offset, TimePattern::HourlyStamp),
                number_or_default(entry.temp),
                number_or_default(entry.feels_like),
            )
        })
        .collect();

    cap_length(&blocks.join("\n"), MAX_RESPONSE_LENGTH)
}

pub fn parse_minutely(entries: Option<&[MinutelyEntry]>, timezone_offset: i64) -> String {
    let Some(entries) = entries else {
        return NO_DATA.to_string();
    };

    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| {
            let precipitation = entry
                .precipitation
                .map_or_else(|| MISSING_FIELD.to_string(), |p| format!("{}%", precipitation_percent(p)));

            format!(
                "**{}**\nPrecipitation: {precipitation}\n",
                format_local(entry.dt, timezone_offset, TimePattern::ClockTime)
            )
        })
        .collect();

    let text = format!("{MINUTELY_DISCLAIMER}\n\n{}", blocks.join("\n"));
    cap_length(&text, MAX_MINUTELY_LENGTH)
}

pub fn parse_current(
    entry: Option<&CurrentEntry>,
    alerts: Option<&[AlertEntry]>,
    timezone_offset: i64,
) -> String {
    let Some(entry) = entry else {
        return NO_DATA.to_string();
    };

    let (main, description) = condition_parts(first_condition(&entry.weather));
    let text = format!(
        "**{}**\n{main} - {description}\n\n",
        format_local(entry.dt, timezone_offset, TimePattern::ClockTime)
    );

    let text = match parse_alerts(alerts, timezone_offset) {
        Some(alert_text) => text + &alert_text,
        None => text,
    };
    cap_length(&text, MAX_RESPONSE_LENGTH)
}

/// Render alerts, or `None` when the payload has no `alerts` collection at all.
/// An empty collection renders as an empty string.
pub fn parse_alerts(alerts: Option<&[AlertEntry]>, timezone_offset: i64) -> Option<String> {
    let alerts = alerts?;

    let blocks: Vec<String> = alerts
        .iter()
        .map(|alert| {
            format!(
                "**{}**\n{} - {}\n{}\n",
                alert.event,
                format_local(alert.start, timezone_offset, TimePattern::AlertStamp),
                format_local(alert.end, timezone_offset, TimePattern::AlertStamp),
                alert.description,
            )
        })
        .collect();

    Some(cap_length(&blocks.join("\n"), MAX_RESPONSE_LENGTH))
}

// Alerts ride along after a blank line, only when there is something to show.
fn with_alerts(text: String, alerts: Option<&[AlertEntry]>, timezone_offset: i64) -> String {
    match parse_alerts(alerts, timezone_offset) {
        Some(alert_text) if !alert_text.is_empty() => format!("{text}\n{alert_text}"),
        _ => text,
    }
}

/// Render the requested category of `payload` as display text.
pub fn render_forecast(category: ForecastCategory, payload: &RawForecastPayload) -> String {
    let offset = payload.offset();
    let alerts = payload.alerts.as_deref();

    match category {
        ForecastCategory::Daily => parse_daily(payload.daily.as_deref(), alerts, offset),
        ForecastCategory::Hourly => parse_hourly(payload.hourly.as_deref(), offset),
        ForecastCategory::Minutely => parse_minutely(payload.minutely.as_deref(), offset),
        ForecastCategory::Current => parse_current(payload.current.as_ref(), alerts, offset),
        ForecastCategory::Alerts => match parse_alerts(alerts, offset) {
            Some(text) if !text.is_empty() => text,
            _ => NO_ALERTS.to_string(),
        },
    }
}
