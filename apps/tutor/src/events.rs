//! In-process "data changed" notifications.
//!
//! Mutating commands call [`DataChangeNotifier::notify`] so read-only views
//! such as a stats panel can refresh. Delivery is best effort and carries no
//! payload.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Handle returned by [`DataChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(Uuid);

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct DataChangeNotifier {
    subscribers: Mutex<Vec<(SubscriptionToken, Callback)>>,
}

impl DataChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionToken
    where
        F: Fn() + Send + Sync + 'static,
    {
        let token = SubscriptionToken(Uuid::new_v4());
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((token, Arc::new(callback)));
        token
    }

    /// Returns false if the token was not subscribed.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(t, _)| *t != token);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Invoke every subscriber in subscription order.
    ///
    /// Callbacks run after the subscriber list is released, so they may
    /// subscribe or unsubscribe; such changes apply from the next notify.
    /// A panicking callback is logged and the remaining ones still run.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        tracing::debug!(subscribers = callbacks.len(), "data changed");
        for (position, callback) in callbacks.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                tracing::error!(position, "data change subscriber panicked");
            }
        }
    }
}
