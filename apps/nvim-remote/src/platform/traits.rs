//! Platform abstraction types
//!
//! Shared types used across platform-specific modules. The per-OS choice of
//! delivery and spawn mode lives in one table here instead of being branched
//! on at every call site.

use serde::{Deserialize, Serialize};

use crate::dispatch::spawn::SpawnMode;
use crate::encoder::DeliveryMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// Delivery and spawn strategy for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    pub platform: Platform,
    pub delivery: DeliveryMode,
    pub spawn: SpawnMode,
}

impl PlatformProfile {
    /// Defaults per platform
    ///
    /// | platform | delivery | spawn |
    /// |---|---|---|
    /// | Windows | KeystrokeInjection | Detached |
    /// | macOS, Linux, other | DirectArgument | Detached |
    ///
    /// Windows argument parsing mangles quoted `+line` prefixes, so files are
    /// typed into the editor there instead.
    pub fn for_platform(platform: Platform) -> Self {
        let delivery = match platform {
            Platform::Windows => DeliveryMode::KeystrokeInjection,
            Platform::MacOs | Platform::Linux | Platform::Other => DeliveryMode::DirectArgument,
        };

        Self {
            platform,
            delivery,
            spawn: SpawnMode::Detached,
        }
    }

    pub fn current() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Apply settings overrides, keeping the platform default for `None`
    pub fn with_overrides(
        mut self,
        delivery: Option<DeliveryMode>,
        spawn: Option<SpawnMode>,
    ) -> Self {
        if let Some(delivery) = delivery {
            self.delivery = delivery;
        }
        if let Some(spawn) = spawn {
            self.spawn = spawn;
        }
        self
    }
}
