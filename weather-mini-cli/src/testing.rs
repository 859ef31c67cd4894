//! Test doubles shared by the session and demo tests.

use anyhow::Result;
use async_trait::async_trait;
use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::Mutex,
};
use tokio::sync::oneshot;
use weather_mini_core::{Forecast, LookupError, WeatherProvider, WeatherResult};

use crate::input::{Input, InputSource};

#[derive(Debug)]
enum Behavior {
    Succeed,
    Fail(LookupError),
    Hang,
}

/// Records every city it is asked for.
#[derive(Debug)]
pub struct FakeProvider {
    behavior: Behavior,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::with(Behavior::Succeed)
    }

    pub fn failing(err: LookupError) -> Self {
        Self::with(Behavior::Fail(err))
    }

    pub fn hanging() -> Self {
        Self::with(Behavior::Hang)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn lookup(&self, city: &str) -> Result<WeatherResult, LookupError> {
        self.calls.lock().unwrap().push(city.to_string());

        match &self.behavior {
            Behavior::Succeed => Ok(WeatherResult {
                city: city.to_string(),
                temperature: "20".into(),
                advice: "wear a coat".into(),
                forecast: Forecast {
                    condition: "Cloudy".into(),
                    wind_direction: "North wind".into(),
                    wind_force: "level 3".into(),
                    date: "2024-01-01".into(),
                },
            }),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

/// Replays a fixed list of inputs, then reports end of input or stalls.
#[derive(Debug)]
pub struct ScriptedInput {
    script: VecDeque<Input>,
    stall: bool,
    on_stall: Option<oneshot::Sender<()>>,
}

impl ScriptedInput {
    pub fn new(script: &[Input]) -> Self {
        Self {
            script: script.iter().cloned().collect(),
            stall: false,
            on_stall: None,
        }
    }

    /// Never produces a line.
    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::new(&[])
        }
    }

    /// Once the script runs out, signal `tx` and wait forever.
    pub fn then_stall_and_notify(mut self, tx: oneshot::Sender<()>) -> Self {
        self.stall = true;
        self.on_stall = Some(tx);
        self
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn read_line(&mut self, _prompt: &str) -> Result<Input> {
        if let Some(input) = self.script.pop_front() {
            return Ok(input);
        }
        if !self.stall {
            return Ok(Input::EndOfInput);
        }

        if let Some(tx) = self.on_stall.take() {
            let _ = tx.send(());
        }
        std::future::pending().await
    }
}

/// Collects output, failing the first write that contains `pattern`.
#[derive(Debug)]
pub struct FlakyWriter {
    buf: Vec<u8>,
    pattern: &'static str,
    failed: bool,
}

impl FlakyWriter {
    pub fn failing_on(pattern: &'static str) -> Self {
        Self {
            buf: Vec::new(),
            pattern,
            failed: false,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

impl Write for FlakyWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if !self.failed && String::from_utf8_lossy(data).contains(self.pattern) {
            self.failed = true;
            return Err(io::Error::other("simulated write failure"));
        }
        self.buf.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
