//! Configuration module for WebShell.
//!
//! This module provides the settings type and the loading functionality.
//! Settings are read once at startup, validated, and then passed explicitly
//! to whichever component needs them.
//!
//! The configuration file supports JSONC format (JSON with comments).

pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    ConfigError, DEFAULT_TITLE, Settings, config_paths, load_config as load_config_default,
    load_config_from_path,
};

/// Loads and validates the settings.
///
/// When `custom_path` is given only that file is considered. Otherwise the
/// default search paths are tried in order. If no file exists anywhere, a
/// commented template is written to the preferred location so the user has
/// something to edit, and `ConfigError::NotFound` is still returned.
///
/// # Errors
///
/// Returns the first error met while locating, reading, parsing or
/// validating the configuration.
pub fn load_settings(custom_path: Option<&Path>) -> Result<(Settings, PathBuf), ConfigError> {
    let result = custom_path.map_or_else(load_config_default, load_config_from_path);

    if matches!(result, Err(ConfigError::NotFound)) && custom_path.is_none() {
        create_default_config_file();
    }

    result
}

/// Creates a template configuration file at the default location.
fn create_default_config_file() {
    let Some(config_path) = config_paths().into_iter().next() else {
        tracing::debug!("no config path available for creating template");
        return;
    };

    if config_path.exists() {
        return;
    }

    match template::create_config_file(&config_path) {
        Ok(()) => {
            tracing::info!(
                path = %config_path.display(),
                "created configuration template, set `url` and restart"
            );
        }
        Err(err) => {
            tracing::debug!(
                error = %err,
                path = %config_path.display(),
                "failed to create configuration template"
            );
        }
    }
}
