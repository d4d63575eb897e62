//! Windows-specific functionality
//!
//! - Process creation flags so the client never opens a console window
//! - Neovim discovery (Program Files, Scoop, winget)

use std::os::windows::process::CommandExt;
use std::path::PathBuf;
use std::process::Command;

use crate::dispatch::spawn::SpawnMode;

const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

pub fn configure_command(command: &mut Command, mode: SpawnMode) {
    let flags = match mode {
        SpawnMode::Detached => CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP,
        SpawnMode::Blocking => CREATE_NO_WINDOW,
    };
    command.creation_flags(flags);
}

pub fn neovim_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from(r"C:\Program Files\Neovim\bin\nvim.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Neovim\bin\nvim.exe"),
    ];

    if let Some(dirs) = directories::BaseDirs::new() {
        let home = dirs.home_dir();
        candidates.push(home.join(r"scoop\shims\nvim.exe"));
        candidates.push(dirs.data_local_dir().join(r"Microsoft\WinGet\Links\nvim.exe"));
    }

    candidates
}
