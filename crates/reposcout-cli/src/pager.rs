//! Best-effort pager integration.
//!
//! When stdout is a terminal and `$PAGER` is set, results stream through
//! the pager; if it cannot be started the output falls back to stdout
//! and the failure is logged, never fatal.

use std::env;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::warn;

const PAGER_ENV: &str = "PAGER";

/// A writer that targets the user's pager when one could be started,
/// and stdout otherwise.
pub struct Pager {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: io::Stdout,
}

impl Pager {
    /// Start the configured pager, falling back to plain stdout when
    /// stdout is not a terminal, no pager is configured, or spawning
    /// fails.
    pub fn start(is_tty: bool) -> Self {
        let mut pager = Self {
            child: None,
            stdin: None,
            stdout: io::stdout(),
        };
        if !is_tty {
            return pager;
        }
        let Some(command) = configured_pager() else {
            return pager;
        };
        match spawn_pager(&command) {
            Ok(mut child) => {
                pager.stdin = child.stdin.take();
                pager.child = Some(child);
            }
            Err(err) => warn!(pager = %command, error = %err, "failed to start pager"),
        }
        pager
    }

    /// The stream results should be written to.
    pub fn writer(&mut self) -> &mut dyn Write {
        match self.stdin.as_mut() {
            Some(stdin) => stdin,
            None => &mut self.stdout,
        }
    }

    /// Close the pager's stdin and wait for it to exit.
    pub fn finish(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.wait() {
                warn!(error = %err, "failed to wait for pager");
            }
        }
    }
}

fn configured_pager() -> Option<String> {
    env::var(PAGER_ENV).ok().filter(|pager| !pager.is_empty())
}

fn spawn_pager(command_line: &str) -> io::Result<Child> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty pager command")
    })?;
    let mut command = Command::new(program);
    command.args(parts).stdin(Stdio::piped());
    // Default less to quit-if-one-screen and raw color passthrough.
    if program == "less" && env::var_os("LESS").is_none() {
        command.env("LESS", "FRX");
    }
    command.spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_stdout_off_tty() {
        let mut pager = Pager::start(false);
        assert!(pager.child.is_none());
        writeln!(pager.writer(), "fallback").expect("write to stdout");
        pager.finish();
    }

    #[test]
    fn spawn_rejects_empty_command() {
        let err = spawn_pager("").expect_err("empty command cannot spawn");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn writes_reach_spawned_pager() {
        // `cat` consumes stdin and exits cleanly, standing in for a pager.
        let mut pager = Pager {
            child: None,
            stdin: None,
            stdout: io::stdout(),
        };
        match spawn_pager("cat") {
            Ok(mut child) => {
                pager.stdin = child.stdin.take();
                pager.child = Some(child);
            }
            Err(_) => return, // environment without cat; nothing to assert
        }
        writeln!(pager.writer(), "hello").expect("write to pager");
        pager.finish();
    }
}
