//! Optional diagnostic output
//!
//! Every log statement in the crate goes through `tracing` and costs nothing
//! until a subscriber is installed. `init` installs one, writing to
//! `SWIPEGUARD_LOG_PATH` when it is set and to stderr otherwise. `RUST_LOG`
//! overrides the default level.

use tracing_subscriber::filter::EnvFilter;

/// Environment variable naming a file to append diagnostics to
pub const LOG_PATH_ENV: &str = "SWIPEGUARD_LOG_PATH";

/// Install the diagnostic subscriber. Returns false if one was already set.
pub fn init() -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::DEBUG.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var(LOG_PATH_ENV)
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .try_init()
            .is_ok();
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
