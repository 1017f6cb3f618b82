use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::model::WeatherSnapshot;

/// Display unit for temperatures. Stored values are always Celsius; this
/// only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Convert a Celsius value for display. Pure and total.
pub fn to_display(celsius: f64, unit: TemperatureUnit) -> (f64, &'static str) {
    match unit {
        TemperatureUnit::Celsius => (celsius, "°C"),
        TemperatureUnit::Fahrenheit => (celsius * 9.0 / 5.0 + 32.0, "°F"),
    }
}

/// Render a snapshot as plain text, converting temperatures on the fly.
/// The snapshot itself is left untouched.
pub fn format_snapshot(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let (temp, symbol) = to_display(snapshot.current.temperature_c, unit);

    let mut out = String::new();
    let _ = writeln!(out, "Current weather for {}:", snapshot.location);
    let _ = writeln!(out, "  Temperature: {temp:.1}{symbol}");
    let _ = writeln!(out, "  Wind speed: {:.1} km/h", snapshot.current.wind_speed_kmh);
    let _ = writeln!(out, "  Time: {}", snapshot.current.observed_at);

    if !snapshot.days.is_empty() {
        let _ = writeln!(out, "\nForecast:");
        for day in &snapshot.days {
            let (max, _) = to_display(day.max_temp_c, unit);
            let (min, _) = to_display(day.min_temp_c, unit);
            let _ = writeln!(
                out,
                "  {}: max {max:.1}{symbol}, min {min:.1}{symbol}, {}",
                day.date, day.condition_summary
            );
        }
    }

    out
}
