//! Structured logging for nvim-remote
//!
//! Log output is the only diagnostic channel a failed dispatch has, so every
//! outcome goes through `tracing` and this module decides where it lands.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
///
/// This sets up tracing with:
/// - Environment-based filtering via RUST_LOG env var
/// - Default level of INFO in release builds, DEBUG in debug builds
/// - Compact output on stderr so stdout stays free for `config` output
///
/// # Example
/// ```ignore
/// use nvim_remote_lib::logging;
/// logging::init();
/// tracing::info!("dispatcher ready");
/// ```
pub fn init() {
    let default_level = if cfg!(debug_assertions) {
        "nvim_remote=debug,nvim_remote_lib=debug,info"
    } else {
        "nvim_remote=info,nvim_remote_lib=info,warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init();
}

/// Initialize logging for tests
///
/// Uses try_init() to avoid panicking if called multiple times.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

pub use tracing::{debug, error, info, warn};
