use crate::{
    Config, ForecastError,
    model::{Coordinates, ForecastCategory, ForecastRequest, RawForecastPayload},
    provider::{fixture::FixtureSource, openweather::OpenWeatherSource},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod fixture;
pub mod openweather;

/// Where geocodes and forecasts come from.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_geocode(
        &self,
        zipcode: &str,
        country_code: &str,
    ) -> Result<Coordinates, ForecastError>;

    /// Fetch the One Call document with `exclude` left out.
    async fn fetch_weather(
        &self,
        coordinates: Coordinates,
        exclude: &[ForecastCategory],
    ) -> Result<RawForecastPayload, ForecastError>;
}

/// Pick the live or fixture source from config.
///
/// The live source needs an API key; a missing one fails here, before any request.
pub fn source_from_config(config: &Config) -> Result<Box<dyn WeatherSource>, ForecastError> {
    if config.use_fixture {
        tracing::info!("Using bundled fixture instead of OpenWeather");
        return Ok(Box::new(FixtureSource::new()?));
    }

    let api_key = config.require_api_key()?;
    let source = OpenWeatherSource::new(&config.base_url, api_key.to_owned(), config.units)?;
    Ok(Box::new(source))
}

/// Geocode the postal code, then fetch only what `request.category` needs.
pub async fn fetch_forecast(
    source: &dyn WeatherSource,
    request: &ForecastRequest,
) -> Result<RawForecastPayload, ForecastError> {
    let coordinates = source
        .fetch_geocode(&request.zipcode, &request.country_code)
        .await?;

    tracing::debug!(
        "Resolved {},{} to {}, {}",
        request.zipcode,
        request.country_code,
        coordinates.lat,
        coordinates.lon
    );

    source
        .fetch_weather(coordinates, &request.category.exclusions())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: ForecastCategory) -> ForecastRequest {
        ForecastRequest {
            zipcode: "M5V".into(),
            country_code: "CA".into(),
            category,
        }
    }

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = source_from_config(&cfg).unwrap_err();
        assert!(matches!(err, ForecastError::MissingApiKey));
    }

    #[test]
    fn source_from_config_works_with_key() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        assert!(source_from_config(&cfg).is_ok());
    }

    #[test]
    fn fixture_source_needs_no_key() {
        let cfg = Config { use_fixture: true, ..Config::default() };
        assert!(source_from_config(&cfg).is_ok());
    }

    #[tokio::test]
    async fn fetch_forecast_scopes_payload_to_category() {
        let cfg = Config { use_fixture: true, ..Config::default() };
        let source = source_from_config(&cfg).expect("fixture source");

        let hourly = fetch_forecast(source.as_ref(), &request(ForecastCategory::Hourly))
            .await
            .expect("fixture fetch");
        assert!(hourly.hourly.is_some());
        assert!(hourly.daily.is_none());
        assert!(hourly.alerts.is_none());

        let daily = fetch_forecast(source.as_ref(), &request(ForecastCategory::Daily))
            .await
            .expect("fixture fetch");
        assert!(daily.daily.is_some());
        assert!(daily.alerts.is_some());
        assert!(daily.current.is_none());
    }
}
