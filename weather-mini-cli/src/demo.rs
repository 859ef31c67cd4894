use anyhow::Result;
use std::io::Write;
use weather_mini_core::WeatherProvider;

use crate::display;

/// Look up each city in turn and print whatever comes back. Returns the
/// number of successful lookups.
pub async fn run<P>(provider: &P, cities: &[String], out: &mut impl Write) -> Result<usize>
where
    P: WeatherProvider + ?Sized,
{
    writeln!(out, "\nRunning demo lookups...")?;

    let mut successes = 0;
    for city in cities {
        writeln!(out, "\nQuerying {city}:")?;
        match provider.lookup(city).await {
            Ok(result) => {
                display::weather(out, &result)?;
                successes += 1;
            }
            Err(err) => display::lookup_failed(out, &err)?,
        }
    }

    Ok(successes)
}
