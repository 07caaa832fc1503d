//! In-memory activity store with change broadcasting.

use crate::subscriptions::{
    StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
use crate::types::{Activity, ActivityId};
use parking_lot::RwLock;
use tracing::debug;

/// The canonical in-memory collection of activities.
///
/// Holds activities in insertion order. `upsert` is the only
/// create-or-modify primitive: whether a call inserts or replaces is
/// decided solely by whether the id already exists. Every mutation
/// broadcasts a [`StoreEvent`] while the write lock is held, so subscribers
/// observe events in exactly the order mutations were applied.
///
/// CRUD operations never fail; durability is the repository's concern.
pub struct ActivityStore {
    /// Activities in insertion order.
    activities: RwLock<Vec<Activity>>,

    /// Change broadcaster (shared with the repository for count events).
    pub(crate) subscriptions: SubscriptionManager,
}

impl ActivityStore {
    /// Create a store over an initial collection.
    pub fn new(initial: Vec<Activity>) -> Self {
        Self {
            activities: RwLock::new(initial),
            subscriptions: SubscriptionManager::new(),
        }
    }

    /// Snapshot of the current collection, in insertion order.
    pub fn all(&self) -> Vec<Activity> {
        self.activities.read().clone()
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.activities.read().len()
    }

    /// Whether the store holds no activities.
    pub fn is_empty(&self) -> bool {
        self.activities.read().is_empty()
    }

    /// Look up an activity by id.
    pub fn find(&self, id: ActivityId) -> Option<Activity> {
        self.activities.read().iter().find(|a| a.id == id).cloned()
    }

    /// Insert or replace by identity.
    ///
    /// If an activity with the same id exists it is replaced in place,
    /// keeping its position; otherwise the activity is appended. Returns
    /// the event that was broadcast. Events are not deduplicated; an
    /// upsert with unchanged content still emits `Updated`.
    pub fn upsert(&self, activity: Activity) -> StoreEvent {
        let mut activities = self.activities.write();

        let event = match activities.iter().position(|a| a.id == activity.id) {
            Some(index) => {
                activities[index] = activity.clone();
                debug!(id = %activity.id, index, "activity updated");
                StoreEvent::Updated { index, activity }
            }
            None => {
                let index = activities.len();
                activities.push(activity.clone());
                debug!(id = %activity.id, index, "activity inserted");
                StoreEvent::Inserted { index, activity }
            }
        };

        // Broadcast under the write lock so event order matches mutation order
        self.subscriptions.broadcast(event.clone());
        event
    }

    /// Remove by identity.
    ///
    /// Returns the removed activity, or `None` if the id was absent;
    /// deleting an already-absent activity is a no-op, not an error.
    /// Positions of subsequent activities shift down by one.
    pub fn remove(&self, id: ActivityId) -> Option<Activity> {
        let mut activities = self.activities.write();

        let index = activities.iter().position(|a| a.id == id)?;
        let activity = activities.remove(index);
        debug!(id = %id, index, "activity removed");

        self.subscriptions.broadcast(StoreEvent::Removed {
            index,
            activity: activity.clone(),
        });
        Some(activity)
    }

    /// Register a subscriber for change events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id)
    }
}
