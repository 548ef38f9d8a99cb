//! Borderless webview window used as the status item popover.

use tauri::{Emitter, LogicalPosition, LogicalSize, WebviewWindow};

use crate::events;
use crate::popover::{ContentSize, PopoverSurface, PreferredEdge, Rect, popover_origin};

/// Logical frame of a window, in screen coordinates.
pub fn window_frame(window: &WebviewWindow) -> Rect {
    let scale = window.scale_factor().unwrap_or(1.0);

    let position = window
        .outer_position()
        .map(|p| (f64::from(p.x) / scale, f64::from(p.y) / scale))
        .unwrap_or((0.0, 0.0));

    let size = window
        .outer_size()
        .map(|s| (f64::from(s.width) / scale, f64::from(s.height) / scale))
        .unwrap_or((0.0, 0.0));

    Rect::new(position.0, position.1, size.0, size.1)
}

/// Logical bounds of the screen the window is on, falling back to the primary screen.
fn screen_bounds(window: &WebviewWindow) -> Option<Rect> {
    let monitor = window
        .current_monitor()
        .ok()
        .flatten()
        .or_else(|| window.primary_monitor().ok().flatten())?;

    let scale = monitor.scale_factor();
    let position = monitor.position();
    let size = monitor.size();

    Some(Rect::new(
        f64::from(position.x) / scale,
        f64::from(position.y) / scale,
        f64::from(size.width) / scale,
        f64::from(size.height) / scale,
    ))
}

/// [`PopoverSurface`] backed by a hidden, undecorated webview window.
pub struct PopoverWindow {
    window: WebviewWindow,
    size: ContentSize,
}

impl PopoverWindow {
    pub const fn new(window: WebviewWindow, size: ContentSize) -> Self { Self { window, size } }

    fn emit_visibility(&self, visible: bool) {
        if let Err(err) = self.window.emit(events::popover::VISIBILITY_CHANGED, visible) {
            tracing::warn!(error = %err, "failed to emit popover visibility");
        }
    }
}

impl PopoverSurface for PopoverWindow {
    fn set_content_size(&mut self, size: ContentSize) {
        self.size = size;
        let logical = LogicalSize::new(f64::from(size.width), f64::from(size.height));
        if let Err(err) = self.window.set_size(logical) {
            tracing::warn!(error = %err, "failed to size popover window");
        }
    }

    fn present(&mut self, anchor: Rect, edge: PreferredEdge) {
        let origin = popover_origin(anchor, self.size, edge, screen_bounds(&self.window));

        if let Err(err) = self.window.set_position(LogicalPosition::new(origin.x, origin.y)) {
            tracing::warn!(error = %err, "failed to position popover window");
        }
        if let Err(err) = self.window.show() {
            tracing::warn!(error = %err, "failed to show popover window");
            return;
        }
        if let Err(err) = self.window.set_focus() {
            tracing::warn!(error = %err, "failed to focus popover window");
        }

        self.emit_visibility(true);
    }

    fn perform_close(&mut self) {
        if let Err(err) = self.window.hide() {
            tracing::warn!(error = %err, "failed to hide popover window");
        }

        self.emit_visibility(false);
    }
}
