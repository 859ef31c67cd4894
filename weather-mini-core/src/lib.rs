//! Core library for the `weather-mini` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The upstream weather provider and its error mapping
//! - Shared domain models (lookup results)
//!
//! It is used by `weather-mini-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::LookupError;
pub use model::{Forecast, WeatherResult};
pub use provider::{WeatherProvider, provider_from_config};
