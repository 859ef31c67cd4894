use serde::{Deserialize, Serialize};

/// Today's entry from the upstream forecast list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub condition: String,
    pub wind_direction: String,
    pub wind_force: String,
    pub date: String,
}

/// A successful lookup. Every field is passed through from upstream as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    /// Current temperature in degrees Celsius, as text.
    pub temperature: String,
    pub advice: String,
    pub forecast: Forecast,
}
