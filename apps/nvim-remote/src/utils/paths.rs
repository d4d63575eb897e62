//! Path utilities for nvim-remote

use std::path::{Path, PathBuf};

/// Expand tilde (~) to the user's home directory
///
/// # Arguments
/// * `path` - A path string that may start with ~/
///
/// # Returns
/// The expanded path string with ~ replaced by the home directory
pub fn expand_tilde(path: &str) -> String {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped).to_string_lossy().to_string();
        }
    } else if path == "~" {
        if let Some(home) = home_dir() {
            return home.to_string_lossy().to_string();
        }
    }
    path.to_string()
}

/// Get the user's home directory
///
/// Uses the `home` crate on macOS, falls back to directories crate otherwise
pub fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        home::home_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// Directory containing `path`
///
/// Both separator styles are accepted. Returns an empty string for a bare
/// file name.
pub fn parent_directory(path: &str) -> String {
    let trimmed = normalize_trailing_slash(path);
    match trimmed.rfind(['/', '\\']) {
        Some(0) => trimmed[..1].to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => Path::new(trimmed)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}

/// Normalize a path by removing trailing slashes
///
/// # Returns
/// The path with trailing slashes removed (except for root "/")
pub fn normalize_trailing_slash(path: &str) -> &str {
    if path == "/" {
        return path;
    }
    path.trim_end_matches(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/test");
        assert!(!expanded.starts_with("~/"));
        assert!(expanded.ends_with("/test") || expanded.ends_with("\\test"));
    }

    #[test]
    fn test_expand_tilde_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(expand_tilde(path), path);
    }

    #[test]
    fn test_parent_directory() {
        assert_eq!(parent_directory("/proj/Game.uproject"), "/proj");
        assert_eq!(parent_directory("/proj/sub/"), "/proj");
        assert_eq!(parent_directory(r"C:\Proj\Game.sln"), r"C:\Proj");
        assert_eq!(parent_directory("/Game.sln"), "/");
        assert_eq!(parent_directory("Game.sln"), "");
    }

    #[test]
    fn test_normalize_trailing_slash() {
        assert_eq!(normalize_trailing_slash("/path/to/dir/"), "/path/to/dir");
        assert_eq!(normalize_trailing_slash("/path/to/dir"), "/path/to/dir");
        assert_eq!(normalize_trailing_slash("/"), "/");
    }
}
