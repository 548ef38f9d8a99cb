//! Command-line entry point.
//!
//! Parses arguments, loads and validates the settings before any UI exists,
//! then hands over to the desktop shell.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config;

/// WebShell - wrap a website in a native window or menu bar popover.
#[derive(Debug, Parser)]
#[command(name = "webshell", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default search paths.
    #[arg(short, long, value_name = "PATH", env = "WEBSHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Validate the configuration, print the resolved settings as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

/// Runs the application from the process arguments.
#[must_use]
pub fn run() -> ExitCode { run_with(Cli::parse()) }

/// Runs the application with already parsed arguments.
#[must_use]
pub fn run_with(cli: Cli) -> ExitCode {
    crate::logging::init();

    let (settings, path) = match config::load_settings(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            eprintln!("webshell: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(path = %path.display(), "configuration loaded");

    if cli.print_config {
        return match serde_json::to_string_pretty(&settings) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("webshell: {err}");
                ExitCode::FAILURE
            }
        };
    }

    match crate::run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "webshell exited with an error");
            eprintln!("webshell: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_parses_config_path() {
        let cli = Cli::try_parse_from(["webshell", "--config", "/tmp/site.jsonc"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/site.jsonc")));
        assert!(!cli.print_config);
    }

    #[test]
    fn test_parses_print_config_flag() {
        let cli = Cli::try_parse_from(["webshell", "-c", "a.json", "--print-config"]).unwrap();
        assert!(cli.print_config);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            config: Some(dir.path().join("absent.jsonc")),
            print_config: true,
        };

        assert_eq!(run_with(cli), ExitCode::FAILURE);
    }

    #[test]
    fn test_print_config_succeeds_for_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(
            &path,
            r#"{ "MenuBarApp": false, "initialWindowWidth": 800, "initialWindowHeight": 600, "url": "https://example.com" }"#,
        )
        .unwrap();

        let cli = Cli {
            config: Some(path),
            print_config: true,
        };

        assert_eq!(run_with(cli), ExitCode::SUCCESS);
    }
}
