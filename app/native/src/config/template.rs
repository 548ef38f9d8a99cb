//! Configuration template generation.
//!
//! Generates a commented configuration file the user can fill in when no
//! configuration exists yet.

use std::fs;
use std::path::Path;

/// Generates a configuration template documenting every key.
///
/// The template is valid JSONC once the placeholder URL is replaced.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// WebShell Configuration File
// ===========================
// This file uses JSONC format (JSON with comments).

{
  // Run from the menu bar: the site opens in a popover under a status item
  // instead of an ordinary window.
  "MenuBarApp": false,

  // Size of the window or popover content, in points (positive integers).
  "initialWindowWidth": 1000,
  "initialWindowHeight": 600,

  // The website to wrap (http or https). "Go Home" returns here.
  "url": "https://example.com",

  // Window title and status item tooltip.
  // "title": "WebShell",

  // Show web notifications as desktop notifications.
  // "showNotifications": true
}
"#
    .to_string()
}

/// Writes the configuration template to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn create_config_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
