//! WebShell - wraps a single website in a native macOS window or menu bar popover.
//!
//! Usage: `webshell [--config <PATH>] [--print-config]`

use std::process::ExitCode;

fn main() -> ExitCode { webshell_lib::cli::run() }
