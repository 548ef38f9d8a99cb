//! Notification Center and dock badge integration.

use mac_notification_sys::NotificationResponse;
use tauri::{AppHandle, Manager, State, WebviewWindow};

use super::MacLifecycle;
use super::content::{MAIN_WINDOW_LABEL, POPOVER_WINDOW_LABEL};
use crate::error::WebShellError;
use crate::lifecycle::ShellHost;
use crate::notifications::{ActivationCallback, NotificationCenter, NotificationSink, WebNotification};
use crate::utils::thread::spawn_named_thread;

/// The notification center managed as app state.
pub type MacNotificationCenter = NotificationCenter<MacNotificationSink>;

fn content_window(app: &AppHandle) -> Option<WebviewWindow> {
    app.get_webview_window(MAIN_WINDOW_LABEL)
        .or_else(|| app.get_webview_window(POPOVER_WINDOW_LABEL))
}

fn set_badge_count(app: &AppHandle, count: Option<i64>) {
    let Some(window) = content_window(app) else {
        return;
    };

    if let Err(err) = window.set_badge_count(count) {
        tracing::warn!(error = %err, "failed to update dock badge");
    }
}

/// Associates delivered notifications with the app bundle.
pub fn init(bundle_identifier: &str) {
    if let Err(err) = mac_notification_sys::set_application(bundle_identifier) {
        tracing::warn!(error = %err, "failed to register notification sender");
    }
}

/// Delivers through the macOS Notification Center.
pub struct MacNotificationSink {
    app: AppHandle,
}

impl MacNotificationSink {
    pub const fn new(app: AppHandle) -> Self { Self { app } }
}

impl NotificationSink for MacNotificationSink {
    /// Shows the notification on a dedicated thread that waits for the
    /// user's response; only a click runs `on_activated`, on the main thread.
    fn deliver(&self, notification: &WebNotification, on_activated: ActivationCallback) -> Result<(), WebShellError> {
        let app = self.app.clone();
        let title = notification.title.clone();
        let body = notification.body.clone();

        let spawned = spawn_named_thread("notification", move || {
            let response = mac_notification_sys::Notification::new()
                .title(&title)
                .message(&body)
                .wait_for_click(true)
                .send();

            match response {
                Ok(NotificationResponse::Click) => {
                    if let Err(err) = app.run_on_main_thread(on_activated) {
                        tracing::warn!(error = %err, "failed to dispatch notification activation");
                    }
                }
                Ok(other) => tracing::debug!(%title, response = ?other, "notification dismissed"),
                Err(err) => tracing::warn!(%title, error = %err, "failed to deliver notification"),
            }
        });

        if spawned {
            Ok(())
        } else {
            Err(WebShellError::NotificationError("notification thread unavailable".to_string()))
        }
    }

    fn set_badge(&self, count: Option<u32>) { set_badge_count(&self.app, count.map(i64::from)); }
}

/// Shows a notification raised by the page through the `Notification` shim.
///
/// Resolves to `false` when the notification was not shown, for instance
/// because notifications are disabled in the settings.
#[tauri::command]
pub async fn deliver_web_notification(
    app: AppHandle,
    center: State<'_, MacNotificationCenter>,
    lifecycle: State<'_, MacLifecycle>,
    notification: WebNotification,
) -> Result<bool, WebShellError> {
    let on_activated: ActivationCallback = Box::new(move || {
        if let Some(lifecycle) = app.try_state::<MacLifecycle>() {
            lifecycle.notification_activated();
        }
    });

    lifecycle.present_notification(&center, &notification, on_activated)
}

/// [`ShellHost`] backed by the running Tauri app.
pub struct TauriShellHost {
    app: AppHandle,
}

impl TauriShellHost {
    pub const fn new(app: AppHandle) -> Self { Self { app } }
}

impl ShellHost for TauriShellHost {
    fn bring_main_window_to_front(&self) {
        let Some(window) = self.app.get_webview_window(MAIN_WINDOW_LABEL) else {
            tracing::debug!("no main window to bring to front");
            return;
        };

        if let Err(err) = window.unminimize() {
            tracing::warn!(error = %err, "failed to unminimize main window");
        }
        if let Err(err) = window.show() {
            tracing::warn!(error = %err, "failed to show main window");
        }
        if let Err(err) = window.set_focus() {
            tracing::warn!(error = %err, "failed to focus main window");
        }
    }

    fn clear_badge(&self) { set_badge_count(&self.app, None); }

    fn remove_delivered_notifications(&self) {
        if let Some(center) = self.app.try_state::<MacNotificationCenter>() {
            center.remove_all_delivered();
        }
    }
}
