//! Settings change propagation.
//!
//! A single process-wide [`SettingsBus`] lets independent components react
//! to preference changes without holding references to each other.
//! Delivery is synchronous: `publish` returns after every subscriber of the
//! topic has run, in subscription order, on the publishing thread.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use wthr_i18n::Language;

use crate::settings::Theme;

/// Notification categories subscribers can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    ThemeChanged,
    UnitsChanged,
    LanguageChanged,
    SettingsChanged,
    FavoritesChanged,
}

/// A published change. The payload carries just enough to avoid a re-read;
/// the preference store stays the authoritative source.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    ThemeChanged(Theme),
    UnitsChanged { use_metric: bool },
    LanguageChanged(Language),
    /// Any other key was written.
    SettingsChanged { key: Option<String> },
    FavoritesChanged { count: usize },
}

impl SettingsEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SettingsEvent::ThemeChanged(_) => Topic::ThemeChanged,
            SettingsEvent::UnitsChanged { .. } => Topic::UnitsChanged,
            SettingsEvent::LanguageChanged(_) => Topic::LanguageChanged,
            SettingsEvent::SettingsChanged { .. } => Topic::SettingsChanged,
            SettingsEvent::FavoritesChanged { .. } => Topic::FavoritesChanged,
        }
    }
}

/// Returned by [`SettingsBus::subscribe`]; pass to `unsubscribe` to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Outcome of a single publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Handlers that returned normally.
    pub delivered: usize,
    /// Handlers that panicked.
    pub failed: usize,
}

type Handler = Arc<dyn Fn(&SettingsEvent) + Send + Sync>;

struct Subscription {
    id: u64,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
pub struct SettingsBus {
    subscriptions: Mutex<Vec<Subscription>>,
    next_id: AtomicU64,
}

impl SettingsBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> SubscriptionHandle
    where
        F: Fn(&SettingsEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscriptions.lock().push(Subscription {
            id,
            topic,
            handler: Arc::new(handler),
        });
        tracing::debug!("Subscribed #{} to {:?}", id, topic);
        SubscriptionHandle(id)
    }

    /// Remove a subscription. Returns false if it was already removed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut subs = self.subscriptions.lock();
        let before = subs.len();
        subs.retain(|s| s.id != handle.0);
        let removed = subs.len() != before;
        if removed {
            tracing::debug!("Unsubscribed #{}", handle.0);
        }
        removed
    }

    /// Deliver `event` to every subscriber of its topic.
    ///
    /// Handlers run against a snapshot of the subscriber list taken before
    /// the first one is called, so a handler may subscribe or unsubscribe
    /// without deadlocking. New subscriptions apply from the next publish;
    /// a handler unsubscribed mid-delivery is not called again. A panicking
    /// handler is logged and skipped.
    pub fn publish(&self, event: SettingsEvent) -> DeliveryReport {
        let topic = event.topic();
        let handlers: Vec<(u64, Handler)> = self
            .subscriptions
            .lock()
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| (s.id, Arc::clone(&s.handler)))
            .collect();

        let mut report = DeliveryReport::default();
        for (id, handler) in handlers {
            if !self.is_live(id) {
                tracing::trace!("Skipping subscriber #{} removed during delivery", id);
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(()) => report.delivered += 1,
                Err(_) => {
                    tracing::error!("Subscriber #{} panicked while handling {:?}", id, topic);
                    report.failed += 1;
                }
            }
        }

        tracing::trace!(
            "Published {:?}: {} delivered, {} failed",
            topic,
            report.delivered,
            report.failed
        );
        report
    }

    fn is_live(&self, id: u64) -> bool {
        self.subscriptions.lock().iter().any(|s| s.id == id)
    }

    /// Number of live subscriptions for `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscriptions
            .lock()
            .iter()
            .filter(|s| s.topic == topic)
            .count()
    }
}

impl std::fmt::Debug for SettingsBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsBus")
            .field("subscriptions", &self.subscriptions.lock().len())
            .finish()
    }
}
