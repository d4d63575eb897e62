//! Settings Module
//!
//! Handles loading and merging settings from JSONC files and the environment.
//! Sources are layered, later ones winning:
//! defaults, user file, workspace file, environment.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::dispatch::spawn::SpawnMode;
use crate::dispatch::RemoteTarget;
use crate::encoder::{DeliveryMode, OpenIn};
use crate::error::{NvimRemoteError, Result};
use crate::platform::{self, PlatformProfile};

/// Explicit server address override
pub const ENV_SERVER: &str = "NVIM_REMOTE_SERVER";
/// Address Neovim exports to jobs started from its terminal
pub const ENV_NVIM: &str = "NVIM";
/// Explicit executable override
pub const ENV_EXECUTABLE: &str = "NVIM_REMOTE_EXECUTABLE";

const SETTINGS_FILENAME: &str = "settings.jsonc";
const SETTINGS_DIR: &str = ".nvim-remote";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Server address of the running Neovim (socket path or host:port)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Path to the nvim executable used as the remote client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    /// Prepend `--headless` to client invocations
    pub headless: bool,
    /// Tab or current window for keystroke-injected opens
    pub open_in: OpenIn,
    /// Overrides the platform's delivery mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<DeliveryMode>,
    /// Overrides the platform's spawn mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_mode: Option<SpawnMode>,
}

impl Settings {
    /// Platform defaults with this file's overrides applied
    pub fn profile(&self) -> PlatformProfile {
        PlatformProfile::current().with_overrides(self.delivery_mode, self.spawn_mode)
    }

    /// Build the remote target, discovering nvim when no executable is set
    pub fn remote_target(&self) -> RemoteTarget {
        let executable = self
            .executable
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(platform::default_executable);

        RemoteTarget::new(self.server.clone().unwrap_or_default(), executable)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(server) = non_empty(ENV_SERVER).or_else(|| non_empty(ENV_NVIM)) {
            debug!("Server address from environment: {}", server);
            self.server = Some(server);
        }
        if let Some(executable) = non_empty(ENV_EXECUTABLE) {
            self.executable = Some(executable);
        }
    }
}

// =============================================================================
// Settings File Paths
// =============================================================================

/// Get the path to the user settings file
pub fn get_user_settings_path() -> Option<PathBuf> {
    crate::utils::paths::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILENAME))
}

/// Get the path to the workspace settings file
pub fn get_workspace_settings_path(workspace: &Path) -> PathBuf {
    workspace.join(SETTINGS_DIR).join(SETTINGS_FILENAME)
}

// =============================================================================
// Settings Loading & Parsing
// =============================================================================

/// Parse a JSONC string (JSON with comments) into a Value
fn parse_jsonc(content: &str) -> Result<Value> {
    let stripped = json_comments::StripComments::new(content.as_bytes());
    serde_json::from_reader(stripped)
        .map_err(|e| NvimRemoteError::config(format!("Failed to parse JSONC: {}", e)))
}

/// Read and parse a settings file; a missing or blank file is `{}`
fn read_settings_file(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!("Settings file does not exist: {:?}", path);
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let value = parse_jsonc(&content)
        .map_err(|e| NvimRemoteError::config(format!("{}: {}", path.display(), e)))?;

    if !value.is_object() {
        return Err(NvimRemoteError::config(format!(
            "{}: settings must be a JSON object",
            path.display()
        )));
    }

    Ok(value)
}

/// Deep merge two JSON values (source into target)
fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(key) {
                    Some(target_value) => deep_merge(target_value, source_value),
                    None => {
                        target_map.insert(key.clone(), source_value.clone());
                    }
                }
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

/// Merge the given files over the defaults, in order
pub fn load_from_files(paths: &[PathBuf]) -> Result<Settings> {
    let mut merged = serde_json::to_value(Settings::default())?;

    for path in paths {
        let layer = read_settings_file(path)?;
        debug!("Loaded settings from {:?}", path);
        deep_merge(&mut merged, &layer);
    }

    serde_json::from_value(merged)
        .map_err(|e| NvimRemoteError::config(format!("Invalid settings: {}", e)))
}

/// Load user and workspace settings, then apply the process environment
pub fn load_settings(workspace: Option<&Path>) -> Result<Settings> {
    let mut paths = Vec::new();
    if let Some(user) = get_user_settings_path() {
        paths.push(user);
    }
    if let Some(workspace) = workspace {
        paths.push(get_workspace_settings_path(workspace));
    }

    let mut settings = load_from_files(&paths)?;
    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = load_from_files(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.open_in, OpenIn::Tab);
        assert!(!settings.headless);
    }

    #[test]
    fn test_parse_jsonc_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "settings.jsonc",
            r#"{
                // socket created by `nvim --listen`
                "server": "/tmp/nvim.sock",
                "openIn": "window", /* keep one window */
                "deliveryMode": "keystroke-injection",
                "spawnMode": "blocking"
            }"#,
        );

        let settings = load_from_files(&[path]).unwrap();
        assert_eq!(settings.server.as_deref(), Some("/tmp/nvim.sock"));
        assert_eq!(settings.open_in, OpenIn::Window);
        assert_eq!(settings.delivery_mode, Some(DeliveryMode::KeystrokeInjection));
        assert_eq!(settings.spawn_mode, Some(SpawnMode::Blocking));
    }

    #[test]
    fn test_workspace_overrides_user() {
        let dir = tempfile::tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.jsonc",
            r#"{ "server": "user-server", "executable": "/opt/nvim/bin/nvim" }"#,
        );
        let workspace = write(dir.path(), "workspace.jsonc", r#"{ "server": "127.0.0.1:6666" }"#);

        let settings = load_from_files(&[user, workspace]).unwrap();
        assert_eq!(settings.server.as_deref(), Some("127.0.0.1:6666"));
        assert_eq!(settings.executable.as_deref(), Some("/opt/nvim/bin/nvim"));
    }

    #[test]
    fn test_missing_and_blank_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let blank = write(dir.path(), "blank.jsonc", "   \n");
        let missing = dir.path().join("missing.jsonc");

        let settings = load_from_files(&[blank, missing]).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.jsonc", r#"{ "server": "#);
        let err = load_from_files(&[bad]).unwrap_err();
        assert!(matches!(err, NvimRemoteError::Config(_)));

        let not_object = write(dir.path(), "array.jsonc", "[1, 2]");
        assert!(matches!(
            load_from_files(&[not_object]).unwrap_err(),
            NvimRemoteError::Config(_)
        ));
    }

    #[test]
    fn test_env_prefers_explicit_server() {
        let env: HashMap<&str, &str> = [
            (ENV_SERVER, "explicit"),
            (ENV_NVIM, "/run/user/1000/nvim.123.0"),
            (ENV_EXECUTABLE, "/usr/local/bin/nvim"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.as_deref(), Some("explicit"));
        assert_eq!(settings.executable.as_deref(), Some("/usr/local/bin/nvim"));
    }

    #[test]
    fn test_env_falls_back_to_nvim_variable() {
        let mut settings = Settings {
            server: Some("from-file".to_string()),
            ..Default::default()
        };
        settings.apply_env(|key| match key {
            ENV_SERVER => Some("  ".to_string()),
            ENV_NVIM => Some("/run/user/1000/nvim.123.0".to_string()),
            _ => None,
        });

        assert_eq!(settings.server.as_deref(), Some("/run/user/1000/nvim.123.0"));
    }

    #[test]
    fn test_remote_target_without_server() {
        let settings = Settings {
            executable: Some("/opt/nvim".to_string()),
            ..Default::default()
        };
        let target = settings.remote_target();
        assert!(!target.has_server());
        assert_eq!(target.executable_path(), "/opt/nvim");
    }

    #[test]
    fn test_blank_executable_falls_back_to_discovery() {
        let settings = Settings {
            server: Some("NVIM1".to_string()),
            executable: Some(" ".to_string()),
            ..Default::default()
        };
        let target = settings.remote_target();
        assert_eq!(target.server_id(), "NVIM1");
        assert!(!target.executable_path().trim().is_empty());
    }

    #[test]
    fn test_profile_applies_overrides() {
        let settings = Settings {
            delivery_mode: Some(DeliveryMode::KeystrokeInjection),
            spawn_mode: Some(SpawnMode::Blocking),
            ..Default::default()
        };
        let profile = settings.profile();
        assert_eq!(profile.delivery, DeliveryMode::KeystrokeInjection);
        assert_eq!(profile.spawn, SpawnMode::Blocking);
    }
}
