//! The content webview showing the configured site.
//!
//! Both presentation modes load the same URL with the notification shim
//! injected. Page actions published on the [`ActionBus`] are executed
//! against whichever content window exists.

use tauri::{AppHandle, Emitter, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::bridge::{ActionBus, PageAction};
use crate::config::Settings;
use crate::error::WebShellError;

/// Label of the ordinary window used in window mode.
pub const MAIN_WINDOW_LABEL: &str = "main";

/// Label of the popover window used in menu bar mode.
pub const POPOVER_WINDOW_LABEL: &str = "popover";

/// Forwards the page's `Notification` API to the native side.
const NOTIFICATION_SHIM: &str = include_str!("../../../scripts/notification-shim.js");

/// Builds the visible, ordinary window for window mode.
///
/// # Errors
///
/// Returns an error if the window cannot be created.
pub fn build_main_window(app: &AppHandle, settings: &Settings) -> tauri::Result<WebviewWindow> {
    let size = settings.content_size();

    WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(settings.url.clone()))
        .title(&settings.title)
        .inner_size(f64::from(size.width), f64::from(size.height))
        .initialization_script(NOTIFICATION_SHIM)
        .build()
}

/// Builds the hidden, undecorated window presented as the popover.
///
/// # Errors
///
/// Returns an error if the window cannot be created.
pub fn build_popover_window(app: &AppHandle, settings: &Settings) -> tauri::Result<WebviewWindow> {
    let size = settings.content_size();

    WebviewWindowBuilder::new(app, POPOVER_WINDOW_LABEL, WebviewUrl::External(settings.url.clone()))
        .title(&settings.title)
        .inner_size(f64::from(size.width), f64::from(size.height))
        .decorations(false)
        .resizable(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .visible(false)
        .initialization_script(NOTIFICATION_SHIM)
        .build()
}

/// Subscribes the content window to every [`PageAction`].
///
/// After an action ran, its event is emitted to the page.
pub fn attach_page_actions(window: &WebviewWindow, bus: &ActionBus, home: &Url) {
    for action in PageAction::ALL {
        let window = window.clone();
        let home = home.clone();

        bus.subscribe(action, move |action| match execute(&window, action, &home) {
            Ok(()) => {
                if let Err(err) = window.emit(action.event(), ()) {
                    tracing::warn!(%action, error = %err, "failed to emit page action event");
                }
            }
            Err(err) => tracing::warn!(%action, error = %err, "page action failed"),
        });
    }
}

fn execute(window: &WebviewWindow, action: PageAction, home: &Url) -> Result<(), WebShellError> {
    match action {
        PageAction::Reload => window.eval("window.location.reload()")?,
        PageAction::GoHome => window.navigate(home.clone())?,
        PageAction::CopyUrl => {
            let url = window.url()?;
            arboard::Clipboard::new()?.set_text(url.to_string())?;
            tracing::debug!(%url, "page url copied");
        }
        PageAction::PrintThisPage => window.print()?,
    }

    Ok(())
}
