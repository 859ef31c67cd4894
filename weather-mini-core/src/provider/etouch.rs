use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::debug;

use crate::{
    error::LookupError,
    model::{Forecast, WeatherResult},
};

use super::WeatherProvider;

/// Body `status` the upstream sends when the city was found.
const SUCCESS_STATUS: i64 = 1000;

/// Client for the `weather_mini` endpoint of the etouch weather service.
#[derive(Debug, Clone)]
pub struct EtouchProvider {
    endpoint: String,
    http: Client,
}

impl EtouchProvider {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: format!("{}/weather_mini", base_url.trim_end_matches('/')),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, city: &str) -> Result<WeatherResult, LookupError> {
        debug!(city, endpoint = %self.endpoint, "sending weather lookup");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("city", city)])
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "upstream responded");

        if status != StatusCode::OK {
            return Err(LookupError::HttpStatus(status.as_u16()));
        }

        let body = res.text().await?;
        parse_body(&body)
    }
}

#[async_trait]
impl WeatherProvider for EtouchProvider {
    async fn lookup(&self, city: &str) -> Result<WeatherResult, LookupError> {
        let outcome = self.fetch(city).await;
        if let Err(err) = &outcome {
            debug!(city, error = %err, "weather lookup failed");
        }
        outcome
    }
}

#[derive(Debug, Deserialize)]
struct MiniEnvelope {
    status: i64,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MiniData {
    city: String,
    #[serde(deserialize_with = "string_or_number")]
    wendu: String,
    ganmao: String,
    forecast: Vec<MiniForecast>,
}

#[derive(Debug, Deserialize)]
struct MiniForecast {
    #[serde(rename = "type")]
    kind: String,
    fengxiang: String,
    fengli: String,
    date: String,
}

fn parse_body(body: &str) -> Result<WeatherResult, LookupError> {
    let envelope: MiniEnvelope = serde_json::from_str(body)?;

    if envelope.status != SUCCESS_STATUS {
        return Err(LookupError::ApiStatus {
            status: envelope.status,
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| LookupError::Unexpected("response is missing `data`".to_string()))?;
    let data: MiniData = serde_json::from_value(data)?;

    let today = data
        .forecast
        .into_iter()
        .next()
        .ok_or(LookupError::EmptyForecast)?;

    Ok(WeatherResult {
        city: data.city,
        temperature: data.wendu,
        advice: data.ganmao,
        forecast: Forecast {
            condition: today.kind,
            wind_direction: today.fengxiang,
            wind_force: today.fengli,
            date: today.date,
        },
    })
}

/// Upstream sends the temperature as a string, but a bare number is accepted too.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
