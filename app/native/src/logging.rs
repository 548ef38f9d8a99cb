//! Structured logging for WebShell.
//!
//! Sets up `tracing` with an `EnvFilter` (`RUST_LOG` overrides the default
//! level) and a compact console formatter.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter: debug for this crate in debug builds, info otherwise.
const fn default_directives() -> &'static str {
    if cfg!(debug_assertions) { "webshell=debug,webshell_lib=debug,info" } else { "webshell=info,webshell_lib=info,warn" }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init();
}

/// Initializes logging for tests, writing through the test harness.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(default_directives()).is_ok());
    }

    #[test]
    fn test_init_is_idempotent() {
        init_test();
        init_test();
        init();
        tracing::debug!("logging initialized twice without panicking");
    }
}
