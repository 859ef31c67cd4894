use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text, validator::Validation};
use std::{
    future::Future,
    io::{self, Write},
    pin::Pin,
};
use tracing::{info, warn};
use weather_mini_core::{Config, config::validate_base_url, provider_from_config};

use crate::{demo, display, input, session::Session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-mini", version, about = "Interactive city weather lookup")]
pub struct Cli {
    /// Upstream base URL, overriding the config file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds, overriding the config file.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Without a subcommand, starts the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a single city and exit.
    Show {
        /// City name, e.g. "北京".
        city: String,
    },

    /// Look up a fixed list of cities (the configured ones if none are given).
    Demo { cities: Vec<String> },

    /// Interactively set the upstream URL and timeout.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?.with_overrides(self.base_url, self.timeout);

        match self.command {
            None => interactive(&config).await,
            Some(Command::Show { city }) => show(&config, &city).await,
            Some(Command::Demo { cities }) => {
                let cities = if cities.is_empty() { config.demo_cities.clone() } else { cities };
                let provider = provider_from_config(&config)?;
                demo::run(provider.as_ref(), &cities, &mut io::stdout().lock()).await?;
                Ok(())
            }
            Some(Command::Configure) => configure(config),
        }
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;

    let interrupt = interrupt_signal();

    let summary = Session::new(provider.as_ref(), input::stdin_source(), io::stdout())
        .run(interrupt)
        .await?;
    info!(exit = ?summary.exit, successes = summary.successes, "session ended");

    Ok(())
}

/// Install the Ctrl-C handler now, not on first poll, so a SIGINT at the very
/// first prompt is caught too.
fn interrupt_signal() -> Pin<Box<dyn Future<Output = ()>>> {
    #[cfg(unix)]
    let listener = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt());
    #[cfg(windows)]
    let listener = tokio::signal::windows::ctrl_c();

    match listener {
        Ok(mut listener) => Box::pin(async move {
            listener.recv().await;
        }),
        Err(err) => {
            warn!(error = %err, "could not listen for Ctrl-C");
            Box::pin(std::future::pending())
        }
    }
}

async fn show(config: &Config, city: &str) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        return Err(anyhow!("City name must not be empty"));
    }

    let provider = provider_from_config(config)?;
    let mut out = io::stdout().lock();

    display::searching(&mut out, city)?;
    match provider.lookup(city).await {
        Ok(result) => {
            display::weather(&mut out, &result)?;
            Ok(())
        }
        Err(err) => Err(anyhow!(err).context(format!("Lookup for '{city}' failed"))),
    }
}

fn configure(current: Config) -> anyhow::Result<()> {
    let base_url = Text::new("Upstream base URL:")
        .with_default(&current.base_url)
        .with_validator(|input: &str| {
            Ok(match validate_base_url(input) {
                Ok(()) => Validation::Valid,
                Err(err) => Validation::Invalid(err.to_string().into()),
            })
        })
        .prompt()
        .context("Failed to read base URL")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .with_validator(|secs: &u64| {
            Ok(if *secs == 0 {
                Validation::Invalid("Timeout must be greater than zero".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read timeout")?;

    let config = Config {
        base_url,
        timeout_secs,
        ..current
    };
    config.validate()?;
    let path = config.save()?;

    let mut out = io::stdout().lock();
    writeln!(out, "Saved configuration to {}", path.display())?;
    Ok(())
}
