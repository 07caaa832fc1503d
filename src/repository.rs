//! Repository façade tying the store to durable storage.

use crate::archive::ActivityArchive;
use crate::error::Result;
use crate::store::ActivityStore;
use crate::subscriptions::{
    StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};
use crate::types::{Activity, ActivityId};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::error;

/// The activity repository.
///
/// Wraps one [`ActivityStore`] and one [`ActivityArchive`]: CRUD calls go
/// to the store, and every mutation is followed by a flush of the whole
/// collection to the archive.
///
/// Durability is best-effort: the in-memory mutation always completes and
/// a failed flush is reported in the log without failing the caller or
/// rolling anything back. In-memory state stays the source of truth for
/// the rest of the process lifetime; callers that need to observe
/// persistence failures can call [`flush`](Self::flush) explicitly.
///
/// Construct one per process (or per test) and hand it to all consumers;
/// there is no ambient global instance.
pub struct ActivityRepository {
    store: ActivityStore,
    archive: Box<dyn ActivityArchive>,
    /// Last published count, for change detection.
    count: AtomicUsize,
}

impl ActivityRepository {
    /// Create a repository over an archive, loading the stored collection.
    pub fn new(archive: Box<dyn ActivityArchive>) -> Self {
        let initial = archive.load();
        let count = initial.len();
        Self {
            store: ActivityStore::new(initial),
            archive,
            count: AtomicUsize::new(count),
        }
    }

    /// Snapshot of all activities, in insertion order.
    pub fn list(&self) -> Vec<Activity> {
        self.store.all()
    }

    /// Live activity count. Always equals `list().len()`.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Look up an activity by id.
    pub fn find_by_id(&self, id: ActivityId) -> Option<Activity> {
        self.store.find(id)
    }

    /// Insert or replace an activity, then flush.
    ///
    /// Emits an `Inserted` or `Updated` event, and a `CountChanged` event
    /// when the count moved. Returns the committed activity.
    pub fn commit(&self, activity: Activity) -> Activity {
        self.store.upsert(activity.clone());
        self.flush_best_effort();
        self.publish_count_if_changed();
        activity
    }

    /// Remove an activity by id, then flush.
    ///
    /// Removing an absent id is a no-op returning `None`.
    pub fn delete(&self, id: ActivityId) -> Option<Activity> {
        let removed = self.store.remove(id);
        self.flush_best_effort();
        self.publish_count_if_changed();
        removed
    }

    /// Write the current collection to the archive.
    pub fn flush(&self) -> Result<()> {
        self.archive.save(&self.store.all())
    }

    /// Register a subscriber for change and count events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.store.subscribe(config)
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id)
    }

    fn flush_best_effort(&self) {
        if let Err(e) = self.flush() {
            error!(error = %e, "flush failed, in-memory state unaffected");
        }
    }

    fn publish_count_if_changed(&self) {
        let current = self.store.len();
        let previous = self.count.swap(current, Ordering::SeqCst);
        if previous != current {
            self.store
                .subscriptions
                .broadcast(StoreEvent::CountChanged { count: current });
        }
    }
}
