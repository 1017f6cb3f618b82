use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, Result};
use crate::model::Coordinate;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Daily variables requested alongside the current-weather block.
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Open-Meteo forecast client. Returns the raw payload; interpreting it is
/// the parser's job.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(FORECAST_URL)
    }

    /// Use a non-default endpoint, e.g. a mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch current conditions plus the daily forecast block for `coord`.
    /// Single GET, no retry.
    pub async fn fetch(&self, coord: Coordinate) -> Result<String> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", coord.latitude.to_string().as_str()),
                ("longitude", coord.longitude.to_string().as_str()),
                ("current_weather", "true"),
                ("daily", DAILY_VARIABLES),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::bad_status(status, &body));
        }

        Ok(body)
    }
}
