use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ForecastCategory, ForecastRequest, Units, build_report, fetch_forecast,
    render_forecast, source_from_config,
};
use inquire::{Confirm, Password, Select, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherforecast", version, about = "Get weather information for your area")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the OpenWeather API key, base URL and units.
    Configure,

    /// Show the forecast for a zip / postal code.
    Forecast {
        /// Zip or postal code. For a Canadian postal code, enter only the first 3 characters.
        zipcode: String,

        /// Country code, e.g. "US" or "CA".
        #[arg(value_parser = parse_country_code)]
        country_code: String,

        /// One of: daily, hourly, minutely, current, alerts.
        #[arg(value_parser = parse_category)]
        forecast_type: ForecastCategory,

        /// Print structured records as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Use the bundled sample data instead of calling OpenWeather.
        #[arg(long)]
        fixture: bool,
    },
}

fn parse_country_code(value: &str) -> Result<String, String> {
    let code = value.trim();
    if code.chars().count() < 2 {
        return Err(format!("country code must be at least 2 characters, got '{value}'"));
    }
    Ok(code.to_string())
}

fn parse_category(value: &str) -> Result<ForecastCategory, forecast_core::ForecastError> {
    value.parse()
}

impl Cli {
    /// `config` is the saved file only; environment overrides apply to forecasts, never to `configure`.
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(config),
            Command::Forecast { zipcode, country_code, forecast_type, json, fixture } => {
                let config = run_config(&config, fixture, |name| std::env::var(name).ok());
                let request = ForecastRequest { zipcode, country_code, category: forecast_type };
                let reply = forecast(&config, &request, json).await?;
                println!("{reply}");
                Ok(())
            }
        }
    }
}

/// Settings for one forecast run: saved config, then environment, then `--fixture`.
fn run_config<F>(saved: &Config, fixture: bool, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = saved.with_overrides(lookup);
    if fixture {
        config.use_fixture = true;
    }
    config
}

/// Unit choices for the prompt and the index of the currently saved one.
fn unit_choices(current: Units) -> (Vec<Units>, usize) {
    let choices = vec![Units::Metric, Units::Imperial, Units::Standard];
    let cursor = choices.iter().position(|u| *u == current).unwrap_or(0);
    (choices, cursor)
}

async fn forecast(config: &Config, request: &ForecastRequest, json: bool) -> anyhow::Result<String> {
    let source = source_from_config(config).map_err(|e| {
        let msg = e.user_message();
        anyhow::Error::new(e).context(msg)
    })?;

    let payload = fetch_forecast(source.as_ref(), request).await.map_err(|e| {
        tracing::error!("Fetching {} forecast failed: {}", request.category, e);
        let msg = e.user_message();
        anyhow::Error::new(e).context(msg)
    })?;

    if json {
        let report = build_report(request.category, &payload);
        return serde_json::to_string_pretty(&report).context("Failed to serialize forecast records");
    }

    Ok(render_forecast(request.category, &payload))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key (leave blank to keep current):")
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let base_url = Text::new("OpenWeather base URL:")
        .with_default(&config.base_url)
        .prompt()?;
    config.base_url = base_url.trim_end_matches('/').to_string();

    let (choices, cursor) = unit_choices(config.units);
    config.units = Select::new("Units:", choices)
        .with_starting_cursor(cursor)
        .prompt()?;

    config.use_fixture = Confirm::new("Use offline sample data instead of the network?")
        .with_default(config.use_fixture)
        .prompt()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_forecast_arguments() {
        let cli = Cli::try_parse_from(["weatherforecast", "forecast", "M5V", "CA", "hourly", "--json"])
            .expect("arguments should parse");

        match cli.command {
            Command::Forecast { zipcode, country_code, forecast_type, json, fixture } => {
                assert_eq!(zipcode, "M5V");
                assert_eq!(country_code, "CA");
                assert_eq!(forecast_type, ForecastCategory::Hourly);
                assert!(json);
                assert!(!fixture);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_short_country_code() {
        let err = Cli::try_parse_from(["weatherforecast", "forecast", "10001", "U", "daily"]).unwrap_err();
        assert!(err.to_string().contains("at least 2 characters"));
    }

    #[test]
    fn rejects_unknown_category() {
        let err = Cli::try_parse_from(["weatherforecast", "forecast", "10001", "US", "weekly"]).unwrap_err();
        assert!(err.to_string().contains("Unsupported forecast category"));
    }

    #[test]
    fn run_config_applies_env_and_fixture_flag() {
        let saved = Config::default();
        let lookup = |name: &str| (name == "OPENWEATHER_APIKEY").then_some("ENV_KEY".to_string());

        let config = run_config(&saved, true, lookup);

        assert_eq!(config.api_key.as_deref(), Some("ENV_KEY"));
        assert!(config.use_fixture);
        assert_eq!(saved.api_key, None);
        assert!(!saved.use_fixture);
    }

    #[test]
    fn unit_prompt_starts_at_saved_units() {
        let (choices, cursor) = unit_choices(Units::Imperial);
        assert_eq!(choices[cursor], Units::Imperial);

        let (choices, cursor) = unit_choices(Units::Standard);
        assert_eq!(choices[cursor], Units::Standard);

        assert_eq!(unit_choices(Units::Metric).1, 0);
    }

    #[tokio::test]
    async fn fixture_forecast_renders_text() {
        let config = Config { use_fixture: true, ..Config::default() };
        let request = ForecastRequest {
            zipcode: "M5V".into(),
            country_code: "CA".into(),
            category: ForecastCategory::Alerts,
        };

        let reply = forecast(&config, &request, false).await.expect("fixture forecast");
        assert!(reply.starts_with("**Wind Warning**"));
    }

    #[tokio::test]
    async fn fixture_forecast_renders_json() {
        let config = Config { use_fixture: true, ..Config::default() };
        let request = ForecastRequest {
            zipcode: "M5V".into(),
            country_code: "CA".into(),
            category: ForecastCategory::Current,
        };

        let reply = forecast(&config, &request, true).await.expect("fixture forecast");
        let value: serde_json::Value = serde_json::from_str(&reply).expect("valid json");
        assert_eq!(value["category"], "current");
        assert_eq!(value["records"]["rain"], "0.21 mm/h");
    }

    #[tokio::test]
    async fn missing_key_fails_before_fetch() {
        let request = ForecastRequest {
            zipcode: "10001".into(),
            country_code: "US".into(),
            category: ForecastCategory::Daily,
        };

        let err = forecast(&Config::default(), &request, false).await.unwrap_err();
        assert_eq!(err.to_string(), "The weather service is not configured.");
    }
}
