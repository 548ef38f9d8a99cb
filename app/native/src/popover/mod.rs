//! Popover visibility controller.
//!
//! Owns the show/hide state of the single popover anchored to the status
//! item button, and keeps the outside-click monitor in step with it:
//!
//! - `show` presents the popover below the status button and (re)starts the monitor.
//! - `hide` closes the popover and stops the monitor.
//! - `toggle` is what the status button click is wired to.
//! - an outside click hides the popover, but only while it is shown.
//!
//! The controller is platform-neutral. The host toolkit supplies the
//! popover surface, the status button anchor and the click monitor.

mod geometry;

use std::sync::{Arc, Weak};

pub use geometry::{ContentSize, Point, PreferredEdge, Rect, is_outside, popover_origin};
use parking_lot::Mutex;

use crate::monitor::{ClickMonitor, OutsideClickCallback};

/// Visibility of the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopoverState {
    #[default]
    Hidden,
    Shown,
}

/// The status bar button the popover hangs from.
pub trait StatusAnchor {
    /// Current bounds of the button, or `None` if the button is unavailable.
    fn bounds(&self) -> Option<Rect>;
}

/// The floating panel that displays the content.
pub trait PopoverSurface {
    /// Sets the content dimensions. Called once, before the first show.
    fn set_content_size(&mut self, size: ContentSize);

    /// Renders the panel attached to `anchor` on the `edge` side.
    fn present(&mut self, anchor: Rect, edge: PreferredEdge);

    /// Closes the panel, animating if the toolkit does.
    fn perform_close(&mut self);
}

/// Show/hide state machine for the status item popover.
pub struct PopoverController<S, A, M> {
    surface: S,
    anchor: A,
    monitor: M,
    state: PopoverState,
    size: ContentSize,
}

impl<S, A, M> PopoverController<S, A, M>
where
    S: PopoverSurface,
    A: StatusAnchor,
    M: ClickMonitor,
{
    /// Builds the controller in the `Hidden` state and sizes the surface.
    ///
    /// Nothing becomes visible and the monitor is not started.
    pub fn initialize(mut surface: S, anchor: A, monitor: M, size: ContentSize) -> Self {
        surface.set_content_size(size);

        Self {
            surface,
            anchor,
            monitor,
            state: PopoverState::Hidden,
            size,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PopoverState { self.state }

    #[must_use]
    pub fn is_shown(&self) -> bool { self.state == PopoverState::Shown }

    #[must_use]
    pub const fn content_size(&self) -> ContentSize { self.size }

    #[must_use]
    pub const fn surface(&self) -> &S { &self.surface }

    #[must_use]
    pub const fn monitor(&self) -> &M { &self.monitor }

    /// Starts the outside-click monitor without showing anything.
    ///
    /// Used once at menu bar setup; the callback ignores clicks while hidden.
    pub fn start_monitor(&mut self) { self.monitor.start(); }

    /// Presents the popover below the status button.
    ///
    /// When the button is unavailable nothing is presented and the state is
    /// left unchanged; the monitor is (re)started either way.
    pub fn show(&mut self) {
        if let Some(bounds) = self.anchor.bounds() {
            self.surface.present(bounds, PreferredEdge::Below);
            self.state = PopoverState::Shown;
            tracing::debug!("popover shown");
        } else {
            tracing::debug!("status item button unavailable, popover not shown");
        }

        self.monitor.start();
    }

    /// Closes the popover and stops the monitor. Safe to call when hidden.
    pub fn hide(&mut self) {
        self.surface.perform_close();
        self.state = PopoverState::Hidden;
        self.monitor.stop();
        tracing::debug!("popover hidden");
    }

    /// Hides the popover when shown, shows it otherwise.
    pub fn toggle(&mut self) {
        if self.is_shown() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Reacts to a pointer-down outside the application.
    ///
    /// Only hides while shown. The monitor may still be running while hidden
    /// (it is started at setup), so the state check must stay here.
    pub fn handle_outside_click(&mut self) {
        if self.is_shown() {
            self.hide();
        }
    }

    /// Ends the controller's lifetime, stopping the monitor.
    pub fn dispose(mut self) -> S {
        self.monitor.stop();
        self.surface
    }
}

/// A controller shared between the status button handler and the monitor callback.
pub type SharedPopover<S, A, M> = Arc<Mutex<PopoverController<S, A, M>>>;

/// Builds a [`SharedPopover`] whose monitor reports back to it.
///
/// `make_monitor` receives the outside-click callback, registered exactly
/// once here. The callback only holds a weak reference, so dropping the
/// last strong handle releases the controller.
pub fn shared<S, A, M, F>(surface: S, anchor: A, size: ContentSize, make_monitor: F) -> SharedPopover<S, A, M>
where
    S: PopoverSurface + Send + 'static,
    A: StatusAnchor + Send + 'static,
    M: ClickMonitor + Send + 'static,
    F: FnOnce(OutsideClickCallback) -> M,
{
    Arc::new_cyclic(|weak: &Weak<Mutex<PopoverController<S, A, M>>>| {
        let weak = weak.clone();
        let callback: OutsideClickCallback = Arc::new(move || {
            if let Some(popover) = weak.upgrade() {
                popover.lock().handle_outside_click();
            }
        });

        Mutex::new(PopoverController::initialize(surface, anchor, make_monitor(callback), size))
    })
}
