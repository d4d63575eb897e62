//! Source code accessor backed by a running Neovim
//!
//! This is the surface host tools call. Every operation returns `bool`;
//! failures are logged as warnings and never propagate.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::dispatch::spawn::{Spawner, SystemSpawner};
use crate::dispatch::{Dispatcher, RemoteTarget};
use crate::encoder::{CommandEncoder, EditorCommand, OpenIn};
use crate::error::Result;
use crate::platform::PlatformProfile;
use crate::settings::Settings;
use crate::utils::{fs, paths};

pub const ACCESSOR_NAME: &str = "NeovimSourceCodeAccessor";
pub const DISPLAY_NAME: &str = "Neovim";
pub const DESCRIPTION: &str = "Open source code files in Neovim";

pub struct NeovimAccessor<S = SystemSpawner> {
    target: RemoteTarget,
    working_directory: PathBuf,
    encoder: CommandEncoder,
    dispatcher: Dispatcher<S>,
}

impl NeovimAccessor<SystemSpawner> {
    /// Build an accessor from resolved settings
    pub fn from_settings(settings: &Settings, working_directory: impl Into<PathBuf>) -> Self {
        let profile = settings.profile();
        debug!(
            "Neovim accessor profile: {:?} delivery={:?} spawn={:?}",
            profile.platform, profile.delivery, profile.spawn
        );

        Self::new(
            settings.remote_target(),
            working_directory,
            profile,
            settings.open_in,
            SystemSpawner,
        )
        .with_headless(settings.headless)
    }
}

impl<S: Spawner> NeovimAccessor<S> {
    pub fn new(
        target: RemoteTarget,
        working_directory: impl Into<PathBuf>,
        profile: PlatformProfile,
        open_in: OpenIn,
        spawner: S,
    ) -> Self {
        Self {
            target,
            working_directory: working_directory.into(),
            encoder: CommandEncoder::new(profile.delivery, open_in),
            dispatcher: Dispatcher::new(spawner, profile.spawn),
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.dispatcher = self.dispatcher.with_headless(headless);
        self
    }

    pub fn target(&self) -> &RemoteTarget {
        &self.target
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    pub fn name(&self) -> &'static str {
        ACCESSOR_NAME
    }

    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    pub fn description(&self) -> &'static str {
        DESCRIPTION
    }

    pub fn can_access_source_code(&self) -> bool {
        true
    }

    /// Show a directory listing (`:Ex`) of an existing directory
    pub fn open_directory_listing(&self, path: &str) -> bool {
        if !fs::directory_exists(path) {
            warn!("Cannot open directory listing, '{}' is not a directory", path);
            return false;
        }
        self.send(&self.encoder.open_directory(path))
    }

    /// Directory listing of the working directory
    pub fn open_solution(&self) -> bool {
        let cwd = self.working_directory.to_string_lossy().to_string();
        self.open_directory_listing(&cwd)
    }

    /// Directory listing of the folder containing `solution_path`
    pub fn open_solution_at_path(&self, solution_path: &str) -> bool {
        self.open_directory_listing(&paths::parent_directory(solution_path))
    }

    pub fn does_solution_exist(&self) -> bool {
        fs::directory_exists(&self.working_directory.to_string_lossy())
    }

    /// Open a file; `line`/`column` values `<= 0` mean unspecified
    pub fn open_file_at_line(&self, path: &str, line: i32, column: i32) -> bool {
        debug!("OpenFileAtLine: {} Line:{} Col:{}", path, line, column);
        self.encode_and_send(self.encoder.open_file_at_line(path, line, column))
    }

    pub fn open_files<P: AsRef<str>>(&self, files: &[P]) -> bool {
        self.encode_and_send(self.encoder.open_files(files))
    }

    /// Adding files to a project has no Neovim equivalent
    pub fn add_source_files<P: AsRef<str>, M: AsRef<str>>(
        &self,
        _paths: &[P],
        _available_modules: &[M],
    ) -> bool {
        false
    }

    pub fn save_all(&self) -> bool {
        self.send(&self.encoder.save_all())
    }

    fn encode_and_send(&self, command: Result<EditorCommand>) -> bool {
        match command {
            Ok(command) => self.send(&command),
            Err(e) => {
                warn!("Not sending command to Neovim: {}", e);
                false
            }
        }
    }

    fn send(&self, command: &EditorCommand) -> bool {
        self.dispatcher.dispatch(&self.target, command)
    }
}
