//! Shared "now"
//!
//! Every projection reads the time from a [`TickingClock`], which only moves
//! when it is ticked. All listings rendered for one tick see the same `now`.
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// A source of wall time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub type SharedClock = Arc<dyn Clock + Send + Sync + 'static>;

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// Useful for unit-tests.
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock(RwLock<DateTime<Utc>>);

#[cfg(test)]
impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(RwLock::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.write() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.0.write() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.read()
    }
}

pub type SubscriptionId = u64;

type Subscriber = Box<dyn Fn(DateTime<Utc>) + Send + Sync + 'static>;

/// The single shared "now", advanced by [`TickingClock::tick`]
pub struct TickingClock {
    source: SharedClock,
    now: RwLock<DateTime<Utc>>,
    subscribers: Mutex<BTreeMap<SubscriptionId, Subscriber>>,
    next_subscription: AtomicU64,
}

pub type SharedTickingClock = Arc<TickingClock>;

impl TickingClock {
    pub fn new(source: SharedClock) -> Self {
        let now = source.now();
        Self {
            source,
            now: RwLock::new(now),
            subscribers: Mutex::new(BTreeMap::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    pub fn new_shared(source: SharedClock) -> SharedTickingClock {
        Arc::new(Self::new(source))
    }

    /// Call `f` with the new `now` on every tick, until unsubscribed
    pub fn subscribe(&self, f: impl Fn(DateTime<Utc>) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        self.subscribers.lock().insert(id, Box::new(f));
        id
    }

    /// Returns `false` if `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.lock().remove(&id).is_some()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Read the source once, publish it as the new `now` and notify subscribers
    pub fn tick(&self) -> DateTime<Utc> {
        let now = self.source.now();
        *self.now.write() = now;

        for subscriber in self.subscribers.lock().values() {
            subscriber(now);
        }
        now
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
