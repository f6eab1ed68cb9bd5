//! Language-change subscribers

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{error, trace};

/// Callback receiving the new language identifier
pub type LanguageChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

type Listeners = Mutex<BTreeMap<u64, LanguageChangeCallback>>;

/// Set of language-change callbacks.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: AtomicU64,
    listeners: Arc<Listeners>,
}

impl Subscribers {
    pub(crate) fn subscribe(&self, callback: LanguageChangeCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().insert(id, callback);
        trace!(id, "Subscriber added");
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Call every subscriber with `lang`. The list is snapshotted first so
    /// callbacks may subscribe, unsubscribe, or query the store.
    pub(crate) fn notify(&self, lang: &str) {
        let snapshot: Vec<(u64, LanguageChangeCallback)> = self
            .listeners
            .lock()
            .iter()
            .map(|(id, cb)| (*id, Arc::clone(cb)))
            .collect();

        for (id, callback) in snapshot {
            invoke_isolated(&callback, lang, Some(id));
        }
    }
}

/// Run one callback, containing a panic so later callbacks still run.
/// `subscriber` is `None` for the construction-time callback.
pub(crate) fn invoke_isolated(callback: &LanguageChangeCallback, lang: &str, subscriber: Option<u64>) {
    if catch_unwind(AssertUnwindSafe(|| callback(lang))).is_err() {
        error!(?subscriber, language = lang, "Language change callback panicked");
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}

/// Handle returned by `on_change`.
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Remove the callback. Returns `false` if it was already removed or the
    /// store is gone.
    pub fn unsubscribe(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.lock().remove(&self.id).is_some())
    }

    /// Identifier of this subscription
    pub fn id(&self) -> u64 {
        self.id
    }
}
