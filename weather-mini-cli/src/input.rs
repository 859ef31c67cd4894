use anyhow::{Context, Result};
use async_trait::async_trait;
use inquire::{InquireError, Text};
use std::{
    io::{self, BufRead, BufReader, IsTerminal, Write},
    thread,
};
use tokio::sync::{mpsc, oneshot};

/// What the user did at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C or Esc at the prompt.
    Interrupted,
    /// Stdin was closed.
    EndOfInput,
}

/// Reads happen off the runtime thread so the session can race them
/// against an interrupt.
#[async_trait]
pub trait InputSource: Send {
    async fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

#[async_trait]
impl<T: InputSource + ?Sized> InputSource for Box<T> {
    async fn read_line(&mut self, prompt: &str) -> Result<Input> {
        (**self).read_line(prompt).await
    }
}

/// Interactive prompt for a real terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

#[async_trait]
impl InputSource for TerminalInput {
    async fn read_line(&mut self, prompt: &str) -> Result<Input> {
        let prompt = prompt.to_string();
        let (tx, rx) = oneshot::channel();

        // Detached rather than `spawn_blocking`: an abandoned prompt must not
        // hold up runtime shutdown.
        thread::spawn(move || {
            let _ = tx.send(Text::new(&prompt).prompt());
        });

        match rx.await.context("Terminal prompt thread exited")? {
            Ok(line) => Ok(Input::Line(line)),
            Err(InquireError::OperationInterrupted | InquireError::OperationCanceled) => {
                Ok(Input::Interrupted)
            }
            Err(err) => Err(err).context("Failed to read from terminal"),
        }
    }
}

/// Plain line reader, used when stdin is piped.
#[derive(Debug)]
pub struct LineInput<W> {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
    echo: W,
}

impl<W: Write + Send> LineInput<W> {
    /// Start a reader thread that forwards each line of `reader`.
    pub fn spawn<R>(reader: R, echo: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, lines) = mpsc::unbounded_channel();

        thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });

        Self { lines, echo }
    }
}

#[async_trait]
impl<W: Write + Send> InputSource for LineInput<W> {
    async fn read_line(&mut self, prompt: &str) -> Result<Input> {
        write!(self.echo, "\n{prompt} ")?;
        self.echo.flush()?;

        match self.lines.recv().await {
            None => Ok(Input::EndOfInput),
            Some(line) => {
                let line = line.context("Failed to read from stdin")?;
                Ok(Input::Line(line))
            }
        }
    }
}

/// Pick the prompt style that suits stdin.
pub fn stdin_source() -> Box<dyn InputSource> {
    if io::stdin().is_terminal() {
        Box::new(TerminalInput)
    } else {
        Box::new(LineInput::spawn(BufReader::new(io::stdin()), io::stdout()))
    }
}
