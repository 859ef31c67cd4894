use crate::{Config, LookupError, WeatherResult, provider::etouch::EtouchProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod etouch;

/// One upstream weather service.
///
/// A lookup always resolves to either a result or a [`LookupError`]; no
/// failure escapes as a panic.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn lookup(&self, city: &str) -> Result<WeatherResult, LookupError>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    config.validate()?;

    let provider = EtouchProvider::new(&config.base_url, config.timeout())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_with_defaults() {
        let provider = provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }

    #[test]
    fn provider_from_config_errors_on_invalid_config() {
        let cfg = Config::default().with_overrides(Some("nonsense".into()), None);

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid base URL"));
    }
}
