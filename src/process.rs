//! External process execution
//!
//! Runs a command to completion and captures its standard output as lines.
//! Standard error is echoed when verbose and discarded otherwise.

use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::process::{Command, Stdio};
use std::thread;

use log::{debug, warn};

use crate::error::{EnvironmentError, Result, TransportError};

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Command line, for messages
    pub command: String,
    /// Standard output, one entry per line
    pub stdout: Vec<String>,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn an unsuccessful exit into an error.
    pub fn check(self) -> Result<Self> {
        match self.code {
            Some(0) => Ok(self),
            Some(code) => Err(TransportError::CommandFailed {
                command: self.command,
                code,
            }
            .into()),
            None => Err(TransportError::Terminated {
                command: self.command,
            }
            .into()),
        }
    }

    /// Standard output joined back into one document.
    pub fn joined(&self) -> String {
        self.stdout.join("\n")
    }
}

/// Something that can run an external command to completion
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// A non-zero exit is not an error here; callers decide with
    /// [`CommandOutput::check`].
    fn run(&self, program: &str, args: &[String], verbose: bool) -> Result<CommandOutput>;
}

/// Runs commands with `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], verbose: bool) -> Result<CommandOutput> {
        let command = command_line(program, args);
        debug!("Executing {}", command);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    EnvironmentError::CliMissing(program.to_string()).into()
                } else {
                    crate::error::Error::from(TransportError::Spawn {
                        command: command.clone(),
                        reason: e.to_string(),
                    })
                }
            })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(TransportError::Spawn {
                command,
                reason: "output streams were not captured".to_string(),
            }
            .into());
        };

        // Stderr is drained alongside stdout so neither pipe can fill up and block
        let lines = thread::scope(|scope| {
            scope.spawn(|| drain_stderr(stderr, &command, verbose));
            read_lines(stdout, &command)
        });

        let status = child.wait()?;
        if !status.success() {
            warn!("{} finished with {}", command, status);
        }

        Ok(CommandOutput {
            command,
            stdout: lines,
            code: status.code(),
        })
    }
}

fn read_lines(stream: impl Read, command: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for_each_line(stream, command, |line| lines.push(line));
    lines
}

fn drain_stderr(mut stream: impl Read, command: &str, verbose: bool) {
    if verbose {
        for_each_line(stream, command, |line| eprintln!("{}", line));
    } else if let Err(e) = io::copy(&mut stream, &mut io::sink()) {
        warn!("Error draining stderr of {}: {}", command, e);
    }
}

/// Feed every line of `stream` to `f` until EOF.
///
/// Invalid UTF-8 is replaced rather than ending the read, so the pipe stays
/// open for as long as the child writes to it.
fn for_each_line(stream: impl Read, command: &str, mut f: impl FnMut(String)) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                f(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Error reading output of {}: {}", command, e);
                break;
            }
        }
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
