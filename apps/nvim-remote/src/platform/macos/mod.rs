//! macOS-specific Neovim discovery
//!
//! GUI-launched processes on macOS do not inherit the login shell's PATH, so
//! Homebrew and bundle installs are probed directly.

use std::path::PathBuf;

/// Well-known Neovim install locations on macOS
const MACOS_LOCATIONS: &[&str] = &[
    "/opt/homebrew/bin/nvim",
    "/usr/local/bin/nvim",
    "/opt/local/bin/nvim",
    "/Applications/Neovim.app/Contents/MacOS/nvim",
];

pub fn neovim_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = MACOS_LOCATIONS.iter().map(PathBuf::from).collect();

    if let Some(home) = home::home_dir() {
        candidates.push(home.join(".local/bin/nvim"));
        candidates.push(home.join(".nix-profile/bin/nvim"));
    }

    candidates
}
