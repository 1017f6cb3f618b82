//! The orchestrator: geocode, fetch, parse, and optionally persist.

use crate::config::Config;
use crate::error::Result;
use crate::forecast::ForecastClient;
use crate::geocoding::{DEFAULT_SUGGESTION_LIMIT, Geocoder, GeocodingClient};
use crate::history::SearchHistoryStore;
use crate::model::{PlaceSuggestion, WeatherSnapshot};
use crate::parser;

/// One-stop weather lookup: place name in, validated snapshot out.
///
/// Lookups carry no retry logic; each failure from geocoding, transport, or
/// parsing propagates to the caller unchanged. History persistence is
/// best-effort and never disturbs the read path.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    forecast: ForecastClient,
    history: Option<SearchHistoryStore>,
}

impl WeatherService {
    /// Service against the public endpoints, with history disabled.
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(
            Box::new(GeocodingClient::new()?),
            ForecastClient::new()?,
        ))
    }

    /// Service from explicit collaborators, with history disabled.
    pub fn with_parts(geocoder: Box<dyn Geocoder>, forecast: ForecastClient) -> Self {
        Self {
            geocoder,
            forecast,
            history: None,
        }
    }

    /// Enable search-history recording through `store`.
    pub fn with_history(mut self, store: SearchHistoryStore) -> Self {
        self.history = Some(store);
        self
    }

    /// Build a service from configuration: endpoint overrides and, when a
    /// `history_db` path is set, an enabled history store.
    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoder: Box<dyn Geocoder> = match &config.geocoding_url {
            Some(url) => Box::new(GeocodingClient::with_base_url(url)?),
            None => Box::new(GeocodingClient::new()?),
        };
        let forecast = match &config.forecast_url {
            Some(url) => ForecastClient::with_base_url(url)?,
            None => ForecastClient::new()?,
        };

        let mut service = Self::with_parts(geocoder, forecast);
        if let Some(path) = &config.history_db {
            service = service.with_history(SearchHistoryStore::open(path)?);
        }
        Ok(service)
    }

    /// Resolve `place_name`, fetch its forecast, and parse the result.
    /// Temperatures in the returned snapshot are always Celsius.
    pub async fn get_weather(&self, place_name: &str) -> Result<WeatherSnapshot> {
        let coord = self.geocoder.resolve(place_name).await?;
        let payload = self.forecast.fetch(coord).await?;
        parser::parse(&payload, place_name)
    }

    /// Record one search in the history store, if one is configured.
    /// Failures are logged and swallowed; the snapshot is already the
    /// caller's and must not be affected.
    pub fn record_search(&self, snapshot: &WeatherSnapshot) {
        let Some(store) = &self.history else {
            return;
        };

        if let Err(err) = store.append(
            &snapshot.location,
            snapshot.current.temperature_c,
            &snapshot.current.observed_at,
        ) {
            log::warn!("failed to record search for '{}': {err}", snapshot.location);
        }
    }

    /// Autocomplete suggestions for a partial place name. Never fails.
    pub async fn suggest(&self, partial: &str) -> Vec<PlaceSuggestion> {
        self.geocoder.suggest(partial, DEFAULT_SUGGESTION_LIMIT).await
    }

    /// Read back recent history, newest first. Empty when history is disabled.
    pub fn recent_searches(&self, limit: usize) -> Result<Vec<crate::model::HistoryRecord>> {
        match &self.history {
            Some(store) => store.recent(limit),
            None => Ok(Vec::new()),
        }
    }
}
