//! Error types for WebShell.
//!
//! This module provides the unified error type used throughout the application.
//! It implements the necessary traits to be returned from Tauri commands.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during application execution.
///
/// This enum implements `Serialize` so it can be returned from Tauri commands,
/// giving the web page structured error information.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum WebShellError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// A desktop notification could not be delivered.
    #[error("Notification error: {0}")]
    NotificationError(String),
    /// A window or webview operation failed.
    #[error("Webview error: {0}")]
    WebviewError(String),
    /// Clipboard access failed.
    #[error("Clipboard error: {0}")]
    ClipboardError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// The desktop shell is not available on this operating system.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<ConfigError> for WebShellError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<std::io::Error> for WebShellError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for WebShellError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<String> for WebShellError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for WebShellError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(target_os = "macos")]
impl From<tauri::Error> for WebShellError {
    fn from(err: tauri::Error) -> Self { Self::WebviewError(err.to_string()) }
}

#[cfg(target_os = "macos")]
impl From<arboard::Error> for WebShellError {
    fn from(err: arboard::Error) -> Self { Self::ClipboardError(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = WebShellError::ConfigError("missing field `url`".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("missing field `url`"));
    }

    #[test]
    fn test_from_config_error() {
        let err: WebShellError = ConfigError::NotFound.into();
        assert!(matches!(err, WebShellError::ConfigError(_)));
        assert!(err.to_string().contains("No configuration file found"));
    }

    #[test]
    fn test_notification_error_display() {
        let err = WebShellError::NotificationError("center unavailable".to_string());
        assert!(err.to_string().contains("Notification error"));
    }

    #[test]
    fn test_unsupported_platform_display() {
        let err = WebShellError::UnsupportedPlatform("linux".to_string());
        assert_eq!(err.to_string(), "Unsupported platform: linux");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: WebShellError = io_err.into();
        assert!(matches!(err, WebShellError::IoError(_)));
    }

    #[test]
    fn test_command_error_display() {
        let err: WebShellError = "Generic failure".into();
        assert_eq!(err.to_string(), "Generic failure");
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let err = WebShellError::ClipboardError("no pasteboard".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("ClipboardError"));
        assert!(json.contains("no pasteboard"));
    }
}
