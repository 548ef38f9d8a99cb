//! Host toolkit integration.
//!
//! - [`macos`] - Tauri status item, popover window, event tap monitor and
//!   content webview

#[cfg(target_os = "macos")]
pub mod macos;
