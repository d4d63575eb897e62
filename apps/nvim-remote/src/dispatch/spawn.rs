//! Process-spawn capabilities used by the dispatcher
//!
//! A [`Spawner`] is the seam between the dispatcher and the OS. The real
//! implementation wraps `std::process::Command`; tests substitute a recorder.

use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use std::str::FromStr;

/// How the editor client process is run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    /// Fire and forget; only the launch itself is checked
    Detached,
    /// Wait for exit and capture the output streams
    Blocking,
}

impl FromStr for SpawnMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detached" => Ok(SpawnMode::Detached),
            "blocking" => Ok(SpawnMode::Blocking),
            other => Err(format!(
                "unknown spawn mode '{}', expected detached or blocking",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub executable_path: String,
    pub argument_string: String,
    pub mode: SpawnMode,
}

impl SpawnRequest {
    /// The argument vector handed to the OS
    pub fn args(&self) -> Vec<String> {
        split_arguments(&self.argument_string)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpawnResult {
    pub succeeded: bool,
    pub exit_code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    /// OS error text when the process never started
    pub launch_error: Option<String>,
}

impl SpawnResult {
    pub fn launched() -> Self {
        Self {
            succeeded: true,
            ..Default::default()
        }
    }

    pub fn launch_failed(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            launch_error: Some(message.into()),
            ..Default::default()
        }
    }
}

pub trait Spawner {
    /// Whether [`Spawner::spawn_detached`] is available on this host
    fn supports_detached(&self) -> bool;

    /// Launch without waiting; the handle is released before returning
    fn spawn_detached(&self, request: &SpawnRequest) -> SpawnResult;

    /// Launch and wait for exit, capturing stdout and stderr
    fn spawn_blocking(&self, request: &SpawnRequest) -> SpawnResult;
}

/// `std::process` backed spawner
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl SystemSpawner {
    fn command(request: &SpawnRequest) -> Command {
        let mut command = Command::new(&request.executable_path);
        command.args(request.args());
        crate::platform::configure_command(&mut command, request.mode);
        command
    }
}

impl Spawner for SystemSpawner {
    fn supports_detached(&self) -> bool {
        true
    }

    fn spawn_detached(&self, request: &SpawnRequest) -> SpawnResult {
        let result = Self::command(request)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match result {
            // Never waited on; on Unix the exited client stays a zombie until the host exits
            Ok(_child) => SpawnResult::launched(),
            Err(e) => SpawnResult::launch_failed(e.to_string()),
        }
    }

    fn spawn_blocking(&self, request: &SpawnRequest) -> SpawnResult {
        match Self::command(request).stdin(Stdio::null()).output() {
            Ok(output) => SpawnResult {
                succeeded: true,
                exit_code: output.status.code(),
                stdout: Some(String::from_utf8_lossy(&output.stdout).trim().to_string()),
                stderr: Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
                launch_error: None,
            },
            Err(e) => SpawnResult::launch_failed(e.to_string()),
        }
    }
}

/// Split an argument string into argv entries
///
/// Whitespace separates arguments outside double quotes. Quotes group and are
/// dropped. A backslash is literal unless it precedes a double quote, so Vim
/// key notation like `<C-\>` and escaped spaces pass through unchanged.
pub fn split_arguments(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
                in_token = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        args.push(current);
    }

    args
}
