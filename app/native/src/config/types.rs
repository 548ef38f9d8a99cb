//! Configuration types for WebShell.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::popover::ContentSize;

/// Default window and tooltip title.
pub const DEFAULT_TITLE: &str = "WebShell";

const fn default_true() -> bool { true }

fn default_title() -> String { DEFAULT_TITLE.to_string() }

/// Validated application settings.
///
/// Loaded once at startup and never mutated afterwards. `MenuBarApp` keeps
/// its capitalized spelling so existing configuration files keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Run as a status bar item with a popover instead of an ordinary window.
    #[serde(rename = "MenuBarApp")]
    pub menu_bar_app: bool,

    /// Width in points of the window or popover content.
    pub initial_window_width: u32,

    /// Height in points of the window or popover content.
    pub initial_window_height: u32,

    /// The website being wrapped. Also the target of "Go Home".
    pub url: Url,

    /// Window title and status item tooltip.
    #[serde(default = "default_title")]
    pub title: String,

    /// Whether web notifications are shown as desktop notifications.
    #[serde(default = "default_true")]
    pub show_notifications: bool,
}

impl Settings {
    /// Parses settings from a JSONC string and validates them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when a required key is missing or has the
    /// wrong type, and `ConfigError::Invalid` when a value is out of range.
    pub fn from_jsonc_str(source: &str) -> Result<Self, ConfigError> {
        Self::from_jsonc_reader(source.as_bytes())
    }

    /// Parses settings from a JSONC reader and validates them.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_jsonc_str`].
    pub fn from_jsonc_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let reader = json_comments::StripComments::new(reader);
        let settings: Self = serde_json::from_reader(reader)?;
        settings.validate()
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the offending key.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.initial_window_width == 0 {
            return Err(ConfigError::Invalid {
                key: "initialWindowWidth",
                reason: "must be a positive integer".to_string(),
            });
        }

        if self.initial_window_height == 0 {
            return Err(ConfigError::Invalid {
                key: "initialWindowHeight",
                reason: "must be a positive integer".to_string(),
            });
        }

        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "url",
                reason: format!("unsupported scheme `{}`, expected http or https", self.url.scheme()),
            });
        }

        Ok(self)
    }

    /// Returns the popover/window content size.
    #[must_use]
    pub const fn content_size(&self) -> ContentSize {
        ContentSize::new(self.initial_window_width, self.initial_window_height)
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/webshell/config.json, \
        ~/Library/Application Support/webshell/config.json, or ~/.webshell.json"
    )]
    NotFound,
    /// The configuration file given explicitly does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFoundAt(PathBuf),
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON, or a key is missing or mistyped.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    /// A key is present with the right type but an unusable value.
    #[error("Invalid value for `{key}`: {reason}")]
    Invalid {
        /// The configuration key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".webshell.jsonc", ".webshell.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/webshell/` when the variable is set
/// 2. `~/.config/webshell/`
/// 3. `~/Library/Application Support/webshell/` (macOS native)
/// 4. `~/.webshell.jsonc` or `~/.webshell.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let dir = PathBuf::from(xdg_config).join("webshell");
        for filename in CONFIG_FILE_NAMES {
            paths.push(dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let dir = home.join(".config").join("webshell");
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME might be ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let dir = config_dir.join("webshell");
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads settings from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFoundAt` if the file does not exist, otherwise
/// any read, parse or validation error.
pub fn load_config_from_path(path: &Path) -> Result<(Settings, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFoundAt(path.to_path_buf()));
    }

    let file = fs::File::open(path)?;
    let settings = Settings::from_jsonc_reader(file)?;
    Ok((settings, path.to_path_buf()))
}

/// Loads settings from the first configuration file found in [`config_paths`].
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, otherwise any read, parse or validation error of
/// the first file found.
pub fn load_config() -> Result<(Settings, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}
