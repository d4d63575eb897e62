//! Drive a running Neovim through its remote-control protocol.
//!
//! Editor actions are encoded into Neovim command strings
//! ([`encoder`]) and delivered to the instance behind a server address by
//! running `nvim --server <addr> --remote[-send] ...` ([`dispatch`]).
//! [`NeovimAccessor`] ties both together behind a `bool`-returning API.

pub mod accessor;
pub mod dispatch;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod platform;
pub mod settings;
pub mod utils;

pub use accessor::NeovimAccessor;
pub use dispatch::spawn::{SpawnMode, SpawnRequest, SpawnResult, Spawner, SystemSpawner};
pub use dispatch::{Dispatcher, RemoteTarget};
pub use encoder::{CommandEncoder, DeliveryMode, EditorCommand, OpenIn, RemoteMode};
pub use error::{NvimRemoteError, Result};
pub use platform::{Platform, PlatformProfile};
pub use settings::Settings;
