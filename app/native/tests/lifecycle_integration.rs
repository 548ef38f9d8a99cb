//! Integration tests for app-mode dependent lifecycle behavior.

use std::cell::RefCell;

use webshell_lib::Settings;
use webshell_lib::lifecycle::{AppMode, Lifecycle, ShellHost};

#[derive(Default)]
struct RecordingHost {
    calls: RefCell<Vec<&'static str>>,
}

impl ShellHost for RecordingHost {
    fn bring_main_window_to_front(&self) { self.calls.borrow_mut().push("front"); }

    fn clear_badge(&self) { self.calls.borrow_mut().push("badge"); }

    fn remove_delivered_notifications(&self) { self.calls.borrow_mut().push("notifications"); }
}

fn settings(menu_bar: bool) -> Settings {
    Settings::from_jsonc_str(&format!(
        r#"{{
            "MenuBarApp": {menu_bar},
            "initialWindowWidth": 800,
            "initialWindowHeight": 600,
            "url": "https://example.com"
        }}"#
    ))
    .unwrap()
}

fn lifecycle(menu_bar: bool) -> Lifecycle<RecordingHost> {
    Lifecycle::new(AppMode::from_settings(&settings(menu_bar)), RecordingHost::default())
}

#[test]
fn test_window_mode_terminates_after_last_window() {
    assert!(lifecycle(false).should_terminate_after_last_window_closed());
}

#[test]
fn test_menu_bar_mode_survives_last_window() {
    assert!(!lifecycle(true).should_terminate_after_last_window_closed());
}

#[test]
fn test_reopen_is_always_handled() {
    for menu_bar in [false, true] {
        for visible in [false, true] {
            assert!(lifecycle(menu_bar).handle_reopen(visible));
        }
    }
}

#[test]
fn test_reopen_clears_badge_and_notifications_in_every_mode() {
    for menu_bar in [false, true] {
        let lifecycle = lifecycle(menu_bar);

        lifecycle.handle_reopen(true);

        let calls = lifecycle.host().calls.borrow();
        assert!(calls.contains(&"badge"));
        assert!(calls.contains(&"notifications"));
        assert!(!calls.contains(&"front"));
    }
}

#[test]
fn test_reopen_without_windows_raises_only_in_window_mode() {
    let windowed = lifecycle(false);
    windowed.handle_reopen(false);
    assert_eq!(windowed.host().calls.borrow().first(), Some(&"front"));

    let menu_bar = lifecycle(true);
    menu_bar.handle_reopen(false);
    assert!(!menu_bar.host().calls.borrow().contains(&"front"));
}

#[test]
fn test_notification_click_clears_delivered() {
    let lifecycle = lifecycle(true);

    assert!(lifecycle.should_present_notification());
    lifecycle.notification_activated();

    assert_eq!(*lifecycle.host().calls.borrow(), vec!["badge", "notifications"]);
}
