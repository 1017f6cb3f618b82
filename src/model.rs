use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates produced by geocoding. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One autocomplete candidate. `country`/`region` stay separate fields so a
/// UI can format them however it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSuggestion {
    pub display_name: String,
    pub country: Option<String>,
    pub region: Option<String>,
}

/// Current conditions at the resolved location. `observed_at` is the
/// provider's own timestamp, carried as opaque text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub observed_at: String,
}

/// One day of the forecast. Temperatures may be NaN when the provider
/// returned null for that slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition_code: i32,
    pub condition_summary: String,
}

/// A complete current+forecast result for one location.
///
/// Temperatures are always Celsius. Unit conversion happens only at display
/// time and never rewrites a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub current: CurrentConditions,
    pub days: Vec<DailyForecast>,
}

/// One persisted search. `recorded_at` is assigned by the store at insert
/// time; `observed_at` is the provider timestamp carried over unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub city: String,
    pub temperature_c: f64,
    pub observed_at: String,
    pub recorded_at: DateTime<Utc>,
}
