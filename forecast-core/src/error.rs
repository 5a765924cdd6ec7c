use thiserror::Error;

/// Which upstream call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Geocode,
    Weather,
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStage::Geocode => f.write_str("geocoding"),
            FetchStage::Weather => f.write_str("weather"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `weatherforecast configure` or set OPENWEATHER_APIKEY."
    )]
    MissingApiKey,

    #[error("OpenWeather {stage} request failed with status {status}: {body}")]
    Upstream {
        stage: FetchStage,
        status: u16,
        body: String,
    },

    #[error(
        "Unsupported forecast category '{0}'. Supported categories: daily, hourly, minutely, current, alerts."
    )]
    UnsupportedCategory(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode OpenWeather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ForecastError {
    /// Short message suitable for a chat reply.
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::MissingApiKey => "The weather service is not configured.".to_string(),
            ForecastError::Upstream { stage: FetchStage::Geocode, .. } => {
                "Could not find that postal code.".to_string()
            }
            ForecastError::Upstream { .. } | ForecastError::Http(_) => {
                "The weather service is unavailable right now.".to_string()
            }
            ForecastError::UnsupportedCategory(c) => format!("Unknown forecast type: {c}"),
            ForecastError::Decode(_) => "The weather service sent an unexpected response.".to_string(),
        }
    }
}
