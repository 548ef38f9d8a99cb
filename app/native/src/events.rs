//! Centralized event definitions for communication with the web content.
//!
//! ## Naming Convention
//!
//! All events follow the pattern: `webshell://<module>/<event-name>`
//!
//! - `webshell://` - Prefix identifying this as a WebShell event
//! - `<module>` - The module/feature that owns the event (e.g., `page`, `popover`)
//! - `<event-name>` - Descriptive kebab-case name for the event

/// Page-control events, emitted to the content webview after the action ran.
///
/// Payload: `()` (no payload)
pub mod page {
    /// The page was sent to the print dialog.
    pub const PRINT_THIS_PAGE: &str = "webshell://page/print-this-page";

    /// The webview navigated back to the configured home URL.
    pub const GO_HOME: &str = "webshell://page/go-home";

    /// The page was reloaded.
    pub const RELOAD: &str = "webshell://page/reload";

    /// The current URL was copied to the clipboard.
    pub const COPY_URL: &str = "webshell://page/copy-url";
}

/// Popover events.
pub mod popover {
    /// Emitted when the popover is presented or closed.
    ///
    /// Payload: `bool` - `true` if shown, `false` if hidden.
    pub const VISIBILITY_CHANGED: &str = "webshell://popover/visibility-changed";
}
