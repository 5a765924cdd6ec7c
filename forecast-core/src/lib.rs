//! Core library for the `weatherforecast` command.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The fetch adapter over a pluggable weather source (live OpenWeather or a bundled fixture)
//! - The One Call payload model
//! - Pure, length-capped text rendering per forecast category, plus a structured form
//!
//! It is used by `forecast-cli`, but the formatter can be reused by any chat front end.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod report;
pub mod time;

pub use config::Config;
pub use error::{FetchStage, ForecastError};
pub use format::render_forecast;
pub use model::{ForecastCategory, ForecastRequest, RawForecastPayload, Units};
pub use provider::{WeatherSource, fetch_forecast, source_from_config};
pub use report::{ForecastReport, build_report};
