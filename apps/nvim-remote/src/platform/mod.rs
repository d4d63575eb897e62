//! Platform-specific functionality
//!
//! This module provides a unified interface for platform-specific operations.
//! It uses a hybrid approach:
//! - **traits** holds the shared [`Platform`] / [`PlatformProfile`] table
//! - **cfg attributes** pick process flags and install locations per OS
//! - **POSIX module** for shared macOS/Linux process setup
//!
//! ## Platform Support
//! - **macOS**: Homebrew and `/Applications` Neovim installs
//! - **Linux**: Snap, distro packages, AppImages under the home directory
//! - **Windows**: Program Files, Scoop and winget installs, no console window

pub mod traits;

#[cfg(unix)]
pub mod posix;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

pub use traits::{Platform, PlatformProfile};

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;
use which::which;

use crate::dispatch::spawn::SpawnMode;

/// Fallback when no Neovim install can be found
pub const DEFAULT_EXECUTABLE: &str = "nvim";

/// Cached result of [`find_neovim`]
static NEOVIM_EXECUTABLE: Lazy<Option<PathBuf>> = Lazy::new(find_neovim);

/// Apply per-OS process flags before spawning
pub fn configure_command(command: &mut Command, mode: SpawnMode) {
    #[cfg(unix)]
    posix::configure_command(command, mode);

    #[cfg(target_os = "windows")]
    windows::configure_command(command, mode);

    #[cfg(not(any(unix, target_os = "windows")))]
    let _ = (command, mode);
}

/// Locate the Neovim executable
///
/// Detection order:
/// 1. PATH lookup
/// 2. Platform-specific install locations
pub fn find_neovim() -> Option<PathBuf> {
    if let Ok(path) = which(DEFAULT_EXECUTABLE) {
        debug!("Found nvim on PATH: {:?}", path);
        return Some(path);
    }

    let candidates = platform_candidates();
    let found = candidates.into_iter().find(|path| path.is_file());
    debug!("nvim install location: {:?}", found);
    found
}

/// Executable path to use when none is configured
pub fn default_executable() -> String {
    NEOVIM_EXECUTABLE
        .as_ref()
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
}

fn platform_candidates() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return macos::neovim_candidates();

    #[cfg(target_os = "linux")]
    return linux::neovim_candidates();

    #[cfg(target_os = "windows")]
    return windows::neovim_candidates();

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    Vec::new()
}
