//! Spin lifecycle notifications
//!
//! Two independent channels: `started` (no payload) and `completed` (the
//! finished [`SpinResult`]). Callbacks run synchronously on the spinning
//! thread, in subscription order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::spin::SpinResult;

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// One notification channel
pub struct Channel<T> {
    subscribers: RwLock<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Channel<T> {
    fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    fn subscribe(&self, id: SubscriptionId, callback: Callback<T>) {
        self.subscribers.write().push((id, callback));
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Deliver to a snapshot of the current subscribers. The lock is released
    /// before any callback runs, so callbacks may (un)subscribe.
    fn emit(&self, payload: &T) {
        let snapshot: Vec<Callback<T>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in snapshot {
            callback(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

/// Started/completed channel pair owned by the engine
pub struct SpinEvents {
    next_id: AtomicU64,
    started: Channel<()>,
    completed: Channel<SpinResult>,
}

impl SpinEvents {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            started: Channel::new(),
            completed: Channel::new(),
        }
    }

    fn allocate_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Subscribe to "spin started"
    pub fn on_started<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.started.subscribe(id, Arc::new(move |_: &()| callback()));
        id
    }

    /// Subscribe to "spin completed"
    pub fn on_completed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SpinResult) + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.completed.subscribe(id, Arc::new(callback));
        id
    }

    /// Remove a subscription from whichever channel holds it
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.started.unsubscribe(id) || self.completed.unsubscribe(id)
    }

    pub fn started(&self) -> &Channel<()> {
        &self.started
    }

    pub fn completed(&self) -> &Channel<SpinResult> {
        &self.completed
    }

    pub(crate) fn emit_started(&self) {
        self.started.emit(&());
    }

    pub(crate) fn emit_completed(&self, result: &SpinResult) {
        self.completed.emit(result);
    }
}

impl Default for SpinEvents {
    fn default() -> Self {
        Self::new()
    }
}
