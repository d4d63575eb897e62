//! POSIX-shared functionality for macOS and Linux
//!
//! Process setup is identical on every Unix-like target, so it lives here
//! rather than being repeated per OS.

use std::os::unix::process::CommandExt;
use std::process::Command;

use crate::dispatch::spawn::SpawnMode;

/// Detached clients get their own process group so a Ctrl-C aimed at the
/// host does not reach them mid-send
pub fn configure_command(command: &mut Command, mode: SpawnMode) {
    if mode == SpawnMode::Detached {
        command.process_group(0);
    }
}
