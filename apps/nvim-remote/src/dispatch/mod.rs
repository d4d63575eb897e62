//! Remote dispatcher
//!
//! Wraps an [`EditorCommand`] in the `--server <id> --<mode> <payload>`
//! envelope, runs the editor executable as a client of the remote instance,
//! and reduces the outcome to success or a logged failure.

pub mod spawn;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encoder::EditorCommand;
use crate::error::{NvimRemoteError, Result};
use spawn::{SpawnMode, SpawnRequest, SpawnResult, Spawner, SystemSpawner};

/// Identity of the running editor instance to command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTarget {
    server_id: String,
    executable_path: String,
}

impl RemoteTarget {
    pub fn new(server_id: impl Into<String>, executable_path: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            executable_path: executable_path.into(),
        }
    }

    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    pub fn executable_path(&self) -> &str {
        &self.executable_path
    }

    pub fn has_server(&self) -> bool {
        !self.server_id.is_empty()
    }
}

/// Build the client argument string for `command`
///
/// This has to match Neovim's remote argument grammar exactly; a malformed
/// envelope fails to connect without a useful error.
pub fn build_argument_string(server_id: &str, command: &EditorCommand, headless: bool) -> String {
    let envelope = format!(
        "--server \"{}\" --{} {}",
        server_id, command.remote_mode, command.payload
    );

    if headless {
        format!("--headless {}", envelope)
    } else {
        envelope
    }
}

pub struct Dispatcher<S = SystemSpawner> {
    spawner: S,
    spawn_mode: SpawnMode,
    headless: bool,
}

impl<S: Spawner> Dispatcher<S> {
    pub fn new(spawner: S, spawn_mode: SpawnMode) -> Self {
        Self {
            spawner,
            spawn_mode,
            headless: false,
        }
    }

    /// Prepend `--headless` to every invocation
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// The mode actually used, after checking the spawner's capabilities
    pub fn effective_spawn_mode(&self) -> SpawnMode {
        match self.spawn_mode {
            SpawnMode::Detached if self.spawner.supports_detached() => SpawnMode::Detached,
            _ => SpawnMode::Blocking,
        }
    }

    /// Deliver `command` to `target`, logging the outcome
    pub fn dispatch(&self, target: &RemoteTarget, command: &EditorCommand) -> bool {
        match self.try_dispatch(target, command) {
            Ok(()) => true,
            Err(NvimRemoteError::NoServer) => {
                warn!(
                    "Failed to communicate with Neovim: no remote server configured. \
                     Start the editor with a server address or set NVIM_REMOTE_SERVER"
                );
                false
            }
            Err(e) => {
                warn!(
                    server = target.server_id(),
                    executable = target.executable_path(),
                    "Failed to communicate with Neovim: {}",
                    e
                );
                false
            }
        }
    }

    /// Same as [`Dispatcher::dispatch`] without the failure log line
    pub fn try_dispatch(&self, target: &RemoteTarget, command: &EditorCommand) -> Result<()> {
        if !target.has_server() {
            return Err(NvimRemoteError::NoServer);
        }

        let request = SpawnRequest {
            executable_path: target.executable_path().to_string(),
            argument_string: build_argument_string(target.server_id(), command, self.headless),
            mode: self.effective_spawn_mode(),
        };

        let result = match request.mode {
            SpawnMode::Detached => self.spawner.spawn_detached(&request),
            SpawnMode::Blocking => self.spawner.spawn_blocking(&request),
        };

        interpret(&request, result)?;

        info!(
            "{}: {} {}",
            target.server_id(),
            request.executable_path,
            request.argument_string
        );
        Ok(())
    }
}

fn interpret(request: &SpawnRequest, result: SpawnResult) -> Result<()> {
    if !result.succeeded {
        let message = result
            .launch_error
            .unwrap_or_else(|| "process could not be started".to_string());
        return Err(NvimRemoteError::launch(
            format!("{} {}", request.executable_path, request.argument_string),
            message,
        ));
    }

    match (request.mode, result.exit_code) {
        (SpawnMode::Detached, _) | (SpawnMode::Blocking, Some(0)) => Ok(()),
        (SpawnMode::Blocking, code) => Err(NvimRemoteError::RemoteExit {
            command: format!("{} {}", request.executable_path, request.argument_string),
            // None means the client was killed by a signal
            code: code.unwrap_or(-1),
            stdout: result.stdout.unwrap_or_default(),
            stderr: result.stderr.unwrap_or_default(),
        }),
    }
}
