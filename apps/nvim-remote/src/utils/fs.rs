//! Filesystem utilities for nvim-remote

use std::path::Path;

/// Check if a directory exists
///
/// # Arguments
/// * `path` - Path to check, `~` is expanded
///
/// # Returns
/// true if the path exists and is a directory
pub fn directory_exists(path: &str) -> bool {
    let path = super::paths::expand_tilde(path);
    Path::new(&path).is_dir()
}
