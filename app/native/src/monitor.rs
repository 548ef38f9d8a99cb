//! Outside-click monitor contract.
//!
//! A monitor passively observes pointer-button-down events anywhere on the
//! desktop and invokes the callback it was constructed with once per event.
//! It never consumes or alters the underlying system event.
//!
//! Failing to install the observer (missing permissions, for instance) is a
//! degraded mode, not an error: the popover simply never auto-dismisses.

use std::sync::Arc;

/// Callback invoked for every observed pointer-down event.
///
/// The callback must not be invoked from inside [`ClickMonitor::start`] or
/// [`ClickMonitor::stop`]; implementations deliver it from their own event
/// source.
pub type OutsideClickCallback = Arc<dyn Fn() + Send + Sync>;

/// Pointer buttons whose button-down events are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
}

/// The buttons every monitor reacts to.
pub const OBSERVED_BUTTONS: [PointerButton; 2] = [PointerButton::Left, PointerButton::Right];

/// Start/stop lifecycle of a global pointer-down observer.
pub trait ClickMonitor {
    /// Begins observing.
    ///
    /// Calling this while already running keeps the existing observation
    /// stream; there is never more than one.
    fn start(&mut self);

    /// Ends observation. Calling this while stopped is a no-op.
    fn stop(&mut self);

    /// Returns whether the monitor is currently observing.
    fn is_running(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observes_left_and_right_buttons() {
        assert!(OBSERVED_BUTTONS.contains(&PointerButton::Left));
        assert!(OBSERVED_BUTTONS.contains(&PointerButton::Right));
        assert_eq!(OBSERVED_BUTTONS.len(), 2);
    }
}
