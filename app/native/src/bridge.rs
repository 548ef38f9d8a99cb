//! Page action bus.
//!
//! Menu items and keyboard shortcuts publish a [`PageAction`]; the content
//! surface subscribes and executes it. Delivery is synchronous, in
//! registration order, and an action with no subscribers is dropped.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::events;

/// A page-control command with no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageAction {
    PrintThisPage,
    GoHome,
    Reload,
    CopyUrl,
}

impl PageAction {
    /// Every action, in menu order.
    pub const ALL: [Self; 4] = [Self::Reload, Self::GoHome, Self::CopyUrl, Self::PrintThisPage];

    /// Stable name of the action, also used as its menu item id.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PrintThisPage => "printThisPage",
            Self::GoHome => "goHome",
            Self::Reload => "reload",
            Self::CopyUrl => "copyUrl",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrintThisPage => "Print This Page",
            Self::GoHome => "Go Home",
            Self::Reload => "Reload",
            Self::CopyUrl => "Copy URL",
        }
    }

    /// Keyboard shortcut in Tauri accelerator syntax.
    #[must_use]
    pub const fn accelerator(self) -> &'static str {
        match self {
            Self::PrintThisPage => "CmdOrCtrl+P",
            Self::GoHome => "CmdOrCtrl+Shift+H",
            Self::Reload => "CmdOrCtrl+R",
            Self::CopyUrl => "CmdOrCtrl+Shift+C",
        }
    }

    /// Event emitted to the content webview once the action ran.
    #[must_use]
    pub const fn event(self) -> &'static str {
        match self {
            Self::PrintThisPage => events::page::PRINT_THIS_PAGE,
            Self::GoHome => events::page::GO_HOME,
            Self::Reload => events::page::RELOAD,
            Self::CopyUrl => events::page::COPY_URL,
        }
    }

    /// Looks an action up by its [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

impl fmt::Display for PageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Handler invoked with the published action.
pub type ActionHandler = Arc<dyn Fn(PageAction) + Send + Sync>;

/// Identifies a subscription for [`ActionBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    action: PageAction,
    handler: ActionHandler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Synchronous publish/subscribe registry for [`PageAction`]s.
#[derive(Default)]
pub struct ActionBus {
    registry: Mutex<Registry>,
}

impl ActionBus {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers `handler` for `action`.
    pub fn subscribe<F>(&self, action: PageAction, handler: F) -> SubscriptionId
    where F: Fn(PageAction) + Send + Sync + 'static {
        let mut registry = self.registry.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push(Subscriber {
            id,
            action,
            handler: Arc::new(handler),
        });
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|subscriber| subscriber.id != id);
        registry.subscribers.len() != before
    }

    /// Delivers `action` to every current subscriber, in registration order,
    /// before returning.
    ///
    /// Handlers run outside the registry lock, so they may subscribe,
    /// unsubscribe or publish themselves.
    pub fn publish(&self, action: PageAction) {
        let handlers: Vec<ActionHandler> = self
            .registry
            .lock()
            .subscribers
            .iter()
            .filter(|subscriber| subscriber.action == action)
            .map(|subscriber| Arc::clone(&subscriber.handler))
            .collect();

        if handlers.is_empty() {
            tracing::debug!(%action, "page action has no subscribers, dropped");
            return;
        }

        tracing::debug!(%action, subscribers = handlers.len(), "publishing page action");
        for handler in handlers {
            handler(action);
        }
    }

    /// Number of handlers currently registered for `action`.
    #[must_use]
    pub fn subscriber_count(&self, action: PageAction) -> usize {
        self.registry.lock().subscribers.iter().filter(|s| s.action == action).count()
    }
}

impl fmt::Debug for ActionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBus")
            .field("subscribers", &self.registry.lock().subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_names_are_stable_camel_case() {
        assert_eq!(PageAction::PrintThisPage.name(), "printThisPage");
        assert_eq!(PageAction::GoHome.name(), "goHome");
        assert_eq!(PageAction::Reload.name(), "reload");
        assert_eq!(PageAction::CopyUrl.name(), "copyUrl");
    }

    #[test]
    fn test_from_name_finds_every_action() {
        for action in PageAction::ALL {
            assert_eq!(PageAction::from_name(action.name()), Some(action));
        }
        assert_eq!(PageAction::from_name("quit"), None);
    }

    #[test]
    fn test_serde_uses_action_names() {
        let json = serde_json::to_string(&PageAction::CopyUrl).unwrap();
        assert_eq!(json, "\"copyUrl\"");
    }

    #[test]
    fn test_publish_without_subscribers_returns() {
        let bus = ActionBus::new();
        bus.publish(PageAction::Reload);
        assert_eq!(bus.subscriber_count(PageAction::Reload), 0);
    }

    #[test]
    fn test_publish_only_reaches_matching_subscribers() {
        let bus = ActionBus::new();
        let reloads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reloads);
        bus.subscribe(PageAction::Reload, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(PageAction::GoHome);
        bus.publish(PageAction::Reload);

        assert_eq!(reloads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_removes_handler_once() {
        let bus = ActionBus::new();
        let id = bus.subscribe(PageAction::GoHome, |_| {});

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(PageAction::GoHome), 0);
    }

    #[test]
    fn test_handler_may_subscribe_during_publish() {
        let bus = Arc::new(ActionBus::new());
        let inner = Arc::clone(&bus);
        bus.subscribe(PageAction::CopyUrl, move |_| {
            inner.subscribe(PageAction::CopyUrl, |_| {});
        });

        bus.publish(PageAction::CopyUrl);

        assert_eq!(bus.subscriber_count(PageAction::CopyUrl), 2);
    }

    #[test]
    fn test_each_action_has_distinct_accelerator() {
        let mut seen = std::collections::HashSet::new();
        for action in PageAction::ALL {
            assert!(seen.insert(action.accelerator()));
        }
    }
}
