//! Linux-specific Neovim discovery
//!
//! Covers distro packages, Snap, Flatpak exports and AppImages dropped into
//! the usual per-user directories.

use std::path::PathBuf;

/// System-wide install locations
const LINUX_LOCATIONS: &[&str] = &[
    "/usr/bin/nvim",
    "/usr/local/bin/nvim",
    "/snap/bin/nvim",
    "/var/lib/flatpak/exports/bin/io.neovim.nvim",
];

/// Per-user locations relative to the home directory
const USER_LOCATIONS: &[&str] = &[
    ".local/bin/nvim",
    ".local/share/flatpak/exports/bin/io.neovim.nvim",
    "Applications/nvim.appimage",
    "AppImages/nvim.appimage",
    ".nix-profile/bin/nvim",
];

pub fn neovim_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = LINUX_LOCATIONS.iter().map(PathBuf::from).collect();

    if let Some(home) = home::home_dir() {
        candidates.extend(USER_LOCATIONS.iter().map(|rel| home.join(rel)));
    }

    candidates
}
