//! Strict parsing of the forecast provider payload into domain types.
//!
//! All format fragility lives here: the payload is deserialized into private
//! wire structs and validated before anything reaches a `WeatherSnapshot`.
//! Structural absence of a required block is fatal; a null value inside one
//! of the daily arrays only poisons that single data point.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{CurrentConditions, DailyForecast, WeatherSnapshot};

/// Display cap on the daily forecast, matching the provider's 7-day block.
pub const MAX_FORECAST_DAYS: usize = 5;

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    current_weather: Option<CurrentWeatherBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Option<Vec<String>>,
    temperature_2m_max: Option<Vec<Option<f64>>>,
    temperature_2m_min: Option<Vec<Option<f64>>>,
    weathercode: Option<Vec<Option<i32>>>,
}

/// Parse a raw forecast payload for `location` into a validated snapshot.
///
/// Fails with [`Error::MalformedData`] naming the offending field when a
/// required block or value is missing, or when the daily arrays disagree in
/// length. A mismatch is rejected outright rather than zipped short.
pub fn parse(payload: &str, location: &str) -> Result<WeatherSnapshot> {
    let payload: ForecastPayload = serde_json::from_str(payload)
        .map_err(|e| Error::MalformedData(format!("forecast payload is not valid JSON: {e}")))?;

    let current = payload
        .current_weather
        .ok_or_else(|| Error::MalformedData("missing 'current_weather' block".into()))?;

    let temperature_c = current
        .temperature
        .ok_or_else(|| Error::MalformedData("missing 'current_weather.temperature'".into()))?;
    let wind_speed_kmh = current
        .windspeed
        .ok_or_else(|| Error::MalformedData("missing 'current_weather.windspeed'".into()))?;
    let observed_at = current
        .time
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::MalformedData("missing 'current_weather.time'".into()))?;

    let daily = payload
        .daily
        .ok_or_else(|| Error::MalformedData("missing 'daily' block".into()))?;

    let dates = daily
        .time
        .ok_or_else(|| Error::MalformedData("missing 'daily.time'".into()))?;
    let max_temps = daily
        .temperature_2m_max
        .ok_or_else(|| Error::MalformedData("missing 'daily.temperature_2m_max'".into()))?;
    let min_temps = daily
        .temperature_2m_min
        .ok_or_else(|| Error::MalformedData("missing 'daily.temperature_2m_min'".into()))?;
    let codes = daily
        .weathercode
        .ok_or_else(|| Error::MalformedData("missing 'daily.weathercode'".into()))?;

    let len = dates.len();
    if max_temps.len() != len || min_temps.len() != len || codes.len() != len {
        return Err(Error::MalformedData(format!(
            "daily arrays disagree in length: time={}, temperature_2m_max={}, \
             temperature_2m_min={}, weathercode={}",
            len,
            max_temps.len(),
            min_temps.len(),
            codes.len(),
        )));
    }

    let days = dates
        .into_iter()
        .zip(max_temps)
        .zip(min_temps)
        .zip(codes)
        .take(MAX_FORECAST_DAYS)
        .map(|(((date, max), min), code)| {
            let code = code.unwrap_or(-1);
            DailyForecast {
                date,
                max_temp_c: max.unwrap_or(f64::NAN),
                min_temp_c: min.unwrap_or(f64::NAN),
                condition_code: code,
                condition_summary: condition_summary(code),
            }
        })
        .collect();

    Ok(WeatherSnapshot {
        location: location.to_string(),
        current: CurrentConditions {
            temperature_c,
            wind_speed_kmh,
            observed_at,
        },
        days,
    })
}

/// Map a WMO weather code to a human-readable summary.
/// See <https://open-meteo.com/en/docs#weathervariables>.
pub fn condition_summary(code: i32) -> String {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        other => return format!("Unknown ({other})"),
    };
    text.to_string()
}
