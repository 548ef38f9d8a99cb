//! Desktop notifications raised by the wrapped website.
//!
//! The page's `Notification` API is forwarded here. Each delivered
//! notification bumps the app icon badge; clearing resets both. Clicking a
//! delivered notification runs the activation callback given at delivery.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::WebShellError;

/// A notification requested by the web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebNotification {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Runs at most once, when the user clicks the delivered notification.
pub type ActivationCallback = Box<dyn FnOnce() + Send + 'static>;

/// The system notification center and app badge.
pub trait NotificationSink {
    /// Shows a desktop notification.
    ///
    /// `on_activated` must be invoked if, and only if, the user clicks it.
    ///
    /// # Errors
    ///
    /// Returns `WebShellError::NotificationError` if the system refused it.
    fn deliver(&self, notification: &WebNotification, on_activated: ActivationCallback) -> Result<(), WebShellError>;

    /// Sets the app icon badge, or clears it with `None`.
    fn set_badge(&self, count: Option<u32>);
}

/// Tracks delivered notifications on top of a [`NotificationSink`].
#[derive(Debug)]
pub struct NotificationCenter<S> {
    sink: S,
    enabled: bool,
    delivered: AtomicU32,
}

impl<S: NotificationSink> NotificationCenter<S> {
    pub const fn new(sink: S, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            delivered: AtomicU32::new(0),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.enabled }

    /// Delivers a notification and bumps the badge.
    ///
    /// Returns `Ok(false)` without touching the system when notifications
    /// are disabled in the settings.
    ///
    /// # Errors
    ///
    /// Propagates the sink's delivery error; the badge is left unchanged.
    pub fn deliver(&self, notification: &WebNotification, on_activated: ActivationCallback) -> Result<bool, WebShellError> {
        if !self.is_enabled() {
            tracing::debug!(title = %notification.title, "notifications disabled, dropping");
            return Ok(false);
        }

        self.sink.deliver(notification, on_activated)?;
        let count = self.delivered.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.sink.set_badge(Some(count));
        tracing::debug!(title = %notification.title, count, "notification delivered");
        Ok(true)
    }

    /// Number of notifications delivered since the last clear.
    #[must_use]
    pub fn delivered_count(&self) -> u32 { self.delivered.load(Ordering::SeqCst) }

    /// Forgets every delivered notification and clears the badge.
    pub fn remove_all_delivered(&self) {
        self.delivered.store(0, Ordering::SeqCst);
        self.sink.set_badge(None);
    }
}
