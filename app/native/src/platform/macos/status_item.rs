//! Status bar item.
//!
//! The tray icon itself is declared in `tauri.conf.json`; this module gives
//! it a tooltip and menu, wires the button click to the popover and exposes
//! the button bounds as the popover anchor.

use tauri::tray::{MouseButton, MouseButtonState, TrayIconEvent};
use tauri::{AppHandle, LogicalPosition, LogicalSize, Manager, WebviewWindow};

use super::{MacPopover, menu};
use crate::config::Settings;
use crate::popover::{Rect, StatusAnchor};

/// Id of the tray icon declared in the app configuration.
pub const TRAY_ID: &str = "webshell";

/// Configures the status item and routes button clicks to the popover.
///
/// Returns `false` when the status item does not exist.
///
/// # Errors
///
/// Returns an error if the menu or tooltip cannot be applied.
pub fn attach(app: &AppHandle, settings: &Settings) -> tauri::Result<bool> {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        tracing::warn!("status item not found, the popover cannot be opened");
        return Ok(false);
    };

    tray.set_tooltip(Some(settings.title.as_str()))?;
    tray.set_menu(Some(menu::build_status_menu(app)?))?;
    tray.on_tray_icon_event(|tray, event| {
        if let TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        } = event
        {
            if let Some(popover) = tray.app_handle().try_state::<MacPopover>() {
                popover.lock().toggle();
            }
        }
    });

    Ok(true)
}

/// Bounds of the status button in logical screen coordinates.
pub fn button_bounds(app: &AppHandle, scale_factor: f64) -> Option<Rect> {
    let rect = app.tray_by_id(TRAY_ID)?.rect().ok().flatten()?;
    let position: LogicalPosition<f64> = rect.position.to_logical(scale_factor);
    let size: LogicalSize<f64> = rect.size.to_logical(scale_factor);
    Some(Rect::new(position.x, position.y, size.width, size.height))
}

/// The status button as seen by the popover controller.
pub struct TrayAnchor {
    app: AppHandle,
    window: WebviewWindow,
}

impl TrayAnchor {
    pub const fn new(app: AppHandle, window: WebviewWindow) -> Self { Self { app, window } }
}

impl StatusAnchor for TrayAnchor {
    fn bounds(&self) -> Option<Rect> {
        let scale_factor = self.window.scale_factor().unwrap_or(1.0);
        button_bounds(&self.app, scale_factor)
    }
}
