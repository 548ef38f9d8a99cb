//! WebShell - a native shell around a single website.
//!
//! The site runs in a webview, either in an ordinary window or in a popover
//! hanging from a status bar item. The shell adds page controls (reload, go
//! home, copy URL, print), desktop notifications and the usual macOS
//! window lifecycle.
//!
//! The state machines live in platform-neutral modules; the Tauri glue is
//! only compiled on macOS.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod monitor;
pub mod notifications;
pub mod popover;

mod platform;
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod utils;

pub use config::Settings;
pub use error::WebShellError;

/// Runs the desktop application until it quits.
///
/// # Errors
///
/// Returns an error if the application could not be built, or
/// `WebShellError::UnsupportedPlatform` outside macOS.
pub fn run(settings: Settings) -> Result<(), WebShellError> {
    #[cfg(target_os = "macos")]
    {
        platform::macos::run(settings)
    }

    #[cfg(not(target_os = "macos"))]
    {
        tracing::error!(url = %settings.url, "the desktop shell requires macOS");
        Err(WebShellError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }
}
