//! Application lifecycle decisions.
//!
//! Menu bar mode keeps the app alive without windows; window mode quits
//! with its last window. Reopening the app and activating a notification
//! both clear the delivered notifications and the dock badge.

use crate::config::Settings;
use crate::error::WebShellError;
use crate::notifications::{ActivationCallback, NotificationCenter, NotificationSink, WebNotification};

/// How the app presents the wrapped site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Status item with a popover, no ordinary window.
    MenuBar,
    /// A single ordinary window.
    Windowed,
}

impl AppMode {
    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        if settings.menu_bar_app { Self::MenuBar } else { Self::Windowed }
    }

    #[must_use]
    pub const fn is_menu_bar(self) -> bool { matches!(self, Self::MenuBar) }
}

/// Host operations the lifecycle drives.
pub trait ShellHost {
    /// Shows, focuses and raises the primary window.
    fn bring_main_window_to_front(&self);

    /// Clears the numeric badge on the app icon.
    fn clear_badge(&self);

    /// Removes every delivered desktop notification.
    fn remove_delivered_notifications(&self);
}

/// Reacts to application-level events according to the [`AppMode`].
#[derive(Debug)]
pub struct Lifecycle<H> {
    mode: AppMode,
    host: H,
}

impl<H: ShellHost> Lifecycle<H> {
    pub const fn new(mode: AppMode, host: H) -> Self { Self { mode, host } }

    #[must_use]
    pub const fn mode(&self) -> AppMode { self.mode }

    #[must_use]
    pub const fn host(&self) -> &H { &self.host }

    /// Closing the last ordinary window quits, except in menu bar mode.
    #[must_use]
    pub const fn should_terminate_after_last_window_closed(&self) -> bool {
        !self.mode.is_menu_bar()
    }

    /// Handles the app being reopened (dock icon click, for instance).
    ///
    /// Always returns `true`: the reopen is handled here.
    pub fn handle_reopen(&self, has_visible_windows: bool) -> bool {
        if !has_visible_windows && !self.mode.is_menu_bar() {
            self.host.bring_main_window_to_front();
        }

        self.clear_delivered();
        true
    }

    /// Incoming notifications are always presented, even when the app is frontmost.
    #[must_use]
    pub const fn should_present_notification(&self) -> bool { true }

    /// Delivers a page notification when the present policy allows it.
    ///
    /// Returns `Ok(false)` when the notification was not shown.
    ///
    /// # Errors
    ///
    /// Propagates the notification center's delivery error.
    pub fn present_notification<S: NotificationSink>(
        &self,
        center: &NotificationCenter<S>,
        notification: &WebNotification,
        on_activated: ActivationCallback,
    ) -> Result<bool, WebShellError> {
        if !self.should_present_notification() {
            tracing::debug!(title = %notification.title, "notification suppressed by present policy");
            return Ok(false);
        }

        center.deliver(notification, on_activated)
    }

    /// Handles the user activating (clicking) a delivered notification.
    pub fn notification_activated(&self) {
        if !self.mode.is_menu_bar() {
            self.host.bring_main_window_to_front();
        }

        self.clear_delivered();
    }

    fn clear_delivered(&self) {
        self.host.clear_badge();
        self.host.remove_delivered_notifications();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        calls: RefCell<Vec<&'static str>>,
    }

    impl ShellHost for RecordingHost {
        fn bring_main_window_to_front(&self) { self.calls.borrow_mut().push("front"); }

        fn clear_badge(&self) { self.calls.borrow_mut().push("badge"); }

        fn remove_delivered_notifications(&self) { self.calls.borrow_mut().push("notifications"); }
    }

    fn calls(lifecycle: &Lifecycle<RecordingHost>) -> Vec<&'static str> {
        lifecycle.host().calls.borrow().clone()
    }

    #[test]
    fn test_reopen_without_windows_raises_main_window() {
        let lifecycle = Lifecycle::new(AppMode::Windowed, RecordingHost::default());

        assert!(lifecycle.handle_reopen(false));

        assert_eq!(calls(&lifecycle), vec!["front", "badge", "notifications"]);
    }

    #[test]
    fn test_reopen_with_visible_windows_only_clears() {
        let lifecycle = Lifecycle::new(AppMode::Windowed, RecordingHost::default());

        lifecycle.handle_reopen(true);

        assert_eq!(calls(&lifecycle), vec!["badge", "notifications"]);
    }

    #[test]
    fn test_reopen_in_menu_bar_mode_never_raises() {
        let lifecycle = Lifecycle::new(AppMode::MenuBar, RecordingHost::default());

        lifecycle.handle_reopen(false);

        assert_eq!(calls(&lifecycle), vec!["badge", "notifications"]);
    }

    #[test]
    fn test_notification_activation_depends_on_mode() {
        let windowed = Lifecycle::new(AppMode::Windowed, RecordingHost::default());
        windowed.notification_activated();
        assert_eq!(calls(&windowed), vec!["front", "badge", "notifications"]);

        let menu_bar = Lifecycle::new(AppMode::MenuBar, RecordingHost::default());
        menu_bar.notification_activated();
        assert_eq!(calls(&menu_bar), vec!["badge", "notifications"]);
    }

    #[test]
    fn test_notifications_are_always_presented() {
        assert!(Lifecycle::new(AppMode::MenuBar, RecordingHost::default()).should_present_notification());
        assert!(Lifecycle::new(AppMode::Windowed, RecordingHost::default()).should_present_notification());
    }

    #[test]
    fn test_mode_follows_menu_bar_setting() {
        let settings = Settings::from_jsonc_str(
            r#"{
                "MenuBarApp": true,
                "initialWindowWidth": 1,
                "initialWindowHeight": 1,
                "url": "https://example.com"
            }"#,
        )
        .unwrap();

        assert_eq!(AppMode::from_settings(&settings), AppMode::MenuBar);
    }

    struct SilentSink;

    impl NotificationSink for SilentSink {
        fn deliver(&self, _: &WebNotification, _: ActivationCallback) -> Result<(), WebShellError> { Ok(()) }

        fn set_badge(&self, _: Option<u32>) {}
    }

    #[test]
    fn test_present_notification_delivers_in_every_mode() {
        let notification = WebNotification {
            title: "Build finished".to_string(),
            body: String::new(),
            tag: None,
        };

        for mode in [AppMode::MenuBar, AppMode::Windowed] {
            let lifecycle = Lifecycle::new(mode, RecordingHost::default());
            let center = NotificationCenter::new(SilentSink, true);

            assert!(lifecycle.present_notification(&center, &notification, Box::new(|| {})).unwrap());
            assert_eq!(center.delivered_count(), 1);
            assert_eq!(lifecycle.mode(), mode);
        }
    }
}
