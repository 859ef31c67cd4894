//! The interactive lookup loop.

use anyhow::Result;
use std::{future::Future, io::Write, pin::Pin};
use tracing::error;
use weather_mini_core::WeatherProvider;

use crate::{
    display,
    input::{Input, InputSource},
};

pub const CITY_PROMPT: &str = "🏙️  City name (q to quit):";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Interrupted,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub exit: Exit,
    pub successes: u32,
}

enum Command<'a> {
    Quit,
    Empty,
    Lookup(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let city = line.trim();
        if city.eq_ignore_ascii_case("q") {
            Command::Quit
        } else if city.is_empty() {
            Command::Empty
        } else {
            Command::Lookup(city)
        }
    }
}

/// One run of the prompt loop, owning its success counter.
pub struct Session<'p, P: ?Sized, I, W> {
    provider: &'p P,
    input: I,
    out: W,
    successes: u32,
}

impl<'p, P, I, W> Session<'p, P, I, W>
where
    P: WeatherProvider + ?Sized,
    I: InputSource,
    W: Write,
{
    pub fn new(provider: &'p P, input: I, out: W) -> Self {
        Self {
            provider,
            input,
            out,
            successes: 0,
        }
    }

    /// Prompt until the user quits, stdin closes or `interrupt` resolves.
    pub async fn run<F>(mut self, interrupt: F) -> Result<Summary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        display::banner(&mut self.out)?;

        loop {
            self.out.flush()?;
            let read = tokio::select! {
                biased;
                () = interrupt.as_mut() => None,
                input = self.input.read_line(CITY_PROMPT) => Some(input),
            };
            let Some(input) = read else {
                return self.finish(Exit::Interrupted);
            };

            let line = match input? {
                Input::Line(line) => line,
                Input::Interrupted => return self.finish(Exit::Interrupted),
                Input::EndOfInput => return self.finish(Exit::EndOfInput),
            };

            let city = match Command::parse(&line) {
                Command::Quit => return self.finish(Exit::Quit),
                Command::Empty => {
                    display::empty_input(&mut self.out)?;
                    continue;
                }
                Command::Lookup(city) => city,
            };

            match self.lookup(city, &mut interrupt).await {
                Ok(true) => {}
                Ok(false) => return self.finish(Exit::Interrupted),
                Err(err) => {
                    error!(error = %err, "lookup iteration failed, continuing");
                    let _ = display::fault(&mut self.out, &err);
                }
            }
        }
    }

    /// Returns `Ok(false)` when interrupted before the lookup finished.
    async fn lookup<F>(&mut self, city: &str, interrupt: &mut Pin<&mut F>) -> Result<bool>
    where
        F: Future<Output = ()>,
    {
        display::searching(&mut self.out, city)?;
        self.out.flush()?;

        let provider = self.provider;
        let outcome = tokio::select! {
            biased;
            outcome = provider.lookup(city) => outcome,
            () = interrupt.as_mut() => return Ok(false),
        };

        match outcome {
            Ok(result) => {
                display::weather(&mut self.out, &result)?;
                self.successes += 1;
            }
            Err(err) => display::lookup_failed(&mut self.out, &err)?,
        }

        Ok(true)
    }

    fn finish(mut self, exit: Exit) -> Result<Summary> {
        match exit {
            Exit::Interrupted => display::interrupted(&mut self.out)?,
            Exit::Quit | Exit::EndOfInput => display::farewell(&mut self.out, self.successes)?,
        }
        self.out.flush()?;

        Ok(Summary {
            exit,
            successes: self.successes,
        })
    }
}
