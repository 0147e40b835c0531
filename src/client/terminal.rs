//! Module `terminal`
//!
//! Line source and sink backed by the process's stdin, stdout and stderr.
//!
//! Stdin is read on its own OS thread and handed over through a channel. A read
//! parked in the runtime's blocking pool cannot be cancelled, and would keep the
//! process alive after Ctrl-C until the user pressed Enter.

use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::thread;
use tokio::sync::mpsc;

use crate::client::handler::{LineSink, LineSource};

/// Lines read ahead of the prompt that asks for them
const STDIN_BACKLOG: usize = 1;

/// Prompts on stdout and yields one line of stdin per call.
pub struct TerminalSource {
    prompt: String,
    lines: Option<mpsc::Receiver<io::Result<String>>>,
}

impl TerminalSource {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            lines: None,
        }
    }
}

/// Starts the detached stdin reader. It stops at end of input, on a read error,
/// or once the receiving side is dropped.
fn spawn_stdin_reader() -> io::Result<mpsc::Receiver<io::Result<String>>> {
    let (tx, rx) = mpsc::channel(STDIN_BACKLOG);

    thread::Builder::new()
        .name("creek-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            debug!("Stdin reader finished");
        })?;

    Ok(rx)
}

impl LineSource for TerminalSource {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.lines.is_none() {
            self.lines = Some(spawn_stdin_reader()?);
        }
        let Some(lines) = self.lines.as_mut() else {
            return Ok(None);
        };

        let mut stdout = io::stdout();
        stdout.write_all(self.prompt.as_bytes())?;
        stdout.flush()?;

        match lines.recv().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => {
                warn!("Failed to read stdin: {}", e);
                Err(e)
            }
            None => {
                // Keep the notice that follows off the prompt line.
                writeln!(stdout)?;
                Ok(None)
            }
        }
    }
}

/// Prints peer lines to stdout and client notices to stderr, so redirecting
/// stdout captures only what the peer sent.
#[derive(Default)]
pub struct TerminalSink;

impl LineSink for TerminalSink {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", text)
    }

    fn write_notice(&mut self, text: &str) -> io::Result<()> {
        io::stdout().flush()?;
        writeln!(io::stderr(), "{}", text)
    }
}
