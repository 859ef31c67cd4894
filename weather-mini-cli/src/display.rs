//! Human-friendly terminal output.

use std::io::{self, Write};

use weather_mini_core::{LookupError, WeatherResult};

const RULE_WIDTH: usize = 40;
const BANNER_WIDTH: usize = 50;

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "🌤️  weather-mini v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Look up current weather for a city.")?;
    writeln!(out, "Type a city name to search, or 'q' to quit.")?;
    writeln!(out, "{rule}")
}

pub fn searching(out: &mut impl Write, city: &str) -> io::Result<()> {
    writeln!(out, "🔍 Looking up weather for {city}...")
}

pub fn weather(out: &mut impl Write, result: &WeatherResult) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let forecast = &result.forecast;

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "📍 Weather for {}", result.city)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "🌡️  Temperature: {}℃", result.temperature)?;
    writeln!(out, "☁️  Today: {}", forecast.condition)?;
    writeln!(out, "🌬️  Wind: {} {}", forecast.wind_direction, forecast.wind_force)?;
    writeln!(out, "📅 Date: {}", forecast.date)?;
    writeln!(out, "💡 Advice: {}", result.advice)?;
    writeln!(out, "{rule}")
}

pub fn lookup_failed(out: &mut impl Write, err: &LookupError) -> io::Result<()> {
    writeln!(out, "❌ Lookup failed: {err}")
}

pub fn fault(out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "❌ Something went wrong: {err:#}")
}

pub fn empty_input(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "⚠️  Please enter a valid city name")
}

pub fn farewell(out: &mut impl Write, successes: u32) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Thanks for using weather-mini! Successful lookups this session: {successes}.")
}

pub fn interrupted(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "👋 Interrupted, thanks for using weather-mini!")
}
