use async_trait::async_trait;

use crate::{
    ForecastError,
    model::{Coordinates, ForecastCategory, RawForecastPayload},
};

use super::WeatherSource;

const GEOCODE_JSON: &str = include_str!("../../fixtures/geocode.json");
const ONECALL_JSON: &str = include_str!("../../fixtures/onecall.json");

/// Offline source serving a bundled sample document for every location.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    coordinates: Coordinates,
    payload: RawForecastPayload,
}

impl FixtureSource {
    pub fn new() -> Result<Self, ForecastError> {
        Ok(Self {
            coordinates: serde_json::from_str(GEOCODE_JSON)?,
            payload: serde_json::from_str(ONECALL_JSON)?,
        })
    }
}

#[async_trait]
impl WeatherSource for FixtureSource {
    async fn fetch_geocode(
        &self,
        zipcode: &str,
        country_code: &str,
    ) -> Result<Coordinates, ForecastError> {
        tracing::debug!("Fixture geocode for {},{}", zipcode, country_code);
        Ok(self.coordinates)
    }

    async fn fetch_weather(
        &self,
        _coordinates: Coordinates,
        exclude: &[ForecastCategory],
    ) -> Result<RawForecastPayload, ForecastError> {
        Ok(self.payload.clone().without(exclude))
    }
}
