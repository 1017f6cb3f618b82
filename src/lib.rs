//! Weather lookup pipeline.
//!
//! This crate defines:
//! - Geocoding of free-text place names (resolution + autocomplete suggestions)
//! - Forecast retrieval and strict, typed parsing of the provider payload
//! - Display-time unit conversion (stored data is always Celsius)
//! - Optional append-only search history in embedded SQLite
//!
//! [`WeatherService`] composes the pieces into a single lookup call; each
//! component is also usable on its own.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geocoding;
pub mod history;
pub mod model;
pub mod parser;
pub mod service;
pub mod units;

pub use config::Config;
pub use error::{Error, Result};
pub use forecast::ForecastClient;
pub use geocoding::{Geocoder, GeocodingClient};
pub use history::SearchHistoryStore;
pub use model::{
    Coordinate, CurrentConditions, DailyForecast, HistoryRecord, PlaceSuggestion, WeatherSnapshot,
};
pub use service::WeatherService;
pub use units::{TemperatureUnit, format_snapshot, to_display};
