use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    ForecastError,
    error::FetchStage,
    model::{Coordinates, ForecastCategory, RawForecastPayload, Units},
};

use super::WeatherSource;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Live source backed by the OpenWeather zip geocoder and One Call 3.0.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    base_url: String,
    api_key: String,
    units: Units,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(base_url: &str, api_key: String, units: Units) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            units,
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        stage: FetchStage,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ForecastError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, query);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!("OpenWeather {} request returned {}", stage, status);
            return Err(ForecastError::Upstream {
                stage,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn fetch_geocode(
        &self,
        zipcode: &str,
        country_code: &str,
    ) -> Result<Coordinates, ForecastError> {
        self.get_json(
            FetchStage::Geocode,
            "/geo/1.0/zip",
            &[("zip", format!("{zipcode},{country_code}"))],
        )
        .await
    }

    async fn fetch_weather(
        &self,
        coordinates: Coordinates,
        exclude: &[ForecastCategory],
    ) -> Result<RawForecastPayload, ForecastError> {
        let exclude = exclude
            .iter()
            .map(ForecastCategory::as_str)
            .collect::<Vec<_>>()
            .join(",");

        self.get_json(
            FetchStage::Weather,
            "/data/3.0/onecall",
            &[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lon.to_string()),
                ("exclude", exclude),
                ("units", self.units.as_str().to_string()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> OpenWeatherSource {
        OpenWeatherSource::new(&server.uri(), "test_key".into(), Units::Imperial)
            .expect("client should build")
    }

    #[tokio::test]
    async fn test_fetch_geocode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/zip"))
            .and(query_param("zip", "10001,US"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "zip": "10001",
                "name": "New York",
                "lat": 40.7484,
                "lon": -73.9967,
                "country": "US"
            })))
            .mount(&mock_server)
            .await;

        let coords = source(&mock_server)
            .fetch_geocode("10001", "US")
            .await
            .expect("geocode should succeed");

        assert_eq!(coords, Coordinates { lat: 40.7484, lon: -73.9967 });
    }

    #[tokio::test]
    async fn test_fetch_weather_sends_exclusions_and_units() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .and(query_param("lat", "40.7"))
            .and(query_param("lon", "-74"))
            .and(query_param("exclude", "daily,minutely,current,alerts"))
            .and(query_param("units", "imperial"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timezone_offset": -18000,
                "hourly": [{ "dt": 1700000000, "temp": 41.2, "feels_like": 38.0,
                             "weather": [{ "main": "Clouds", "description": "few clouds" }] }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload = source(&mock_server)
            .fetch_weather(
                Coordinates { lat: 40.7, lon: -74.0 },
                &ForecastCategory::Hourly.exclusions(),
            )
            .await
            .expect("weather should succeed");

        assert_eq!(payload.offset(), -18000);
        assert_eq!(payload.hourly.map(|h| h.len()), Some(1));
    }

    #[tokio::test]
    async fn test_geocode_not_found_is_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/zip"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "not found" })),
            )
            .mount(&mock_server)
            .await;

        let err = source(&mock_server).fetch_geocode("00000", "US").await.unwrap_err();

        match err {
            ForecastError::Upstream { stage, status, body } => {
                assert_eq!(stage, FetchStage::Geocode);
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_weather_unauthorized_is_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = source(&mock_server)
            .fetch_weather(Coordinates { lat: 0.0, lon: 0.0 }, &[])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ForecastError::Upstream { stage: FetchStage::Weather, status: 401, .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/zip"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = source(&mock_server).fetch_geocode("10001", "US").await.unwrap_err();
        assert!(matches!(err, ForecastError::Decode(_)));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
