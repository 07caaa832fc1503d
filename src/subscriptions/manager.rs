//! Subscription manager for broadcasting change events.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<StoreEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if the buffer is full or the
    /// receiver is gone (subscriber will be dropped).
    fn try_send(&self, event: StoreEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    /// Check if this subscription wants an event.
    fn matches(&self, event: &StoreEvent) -> bool {
        match event {
            StoreEvent::Inserted { .. } | StoreEvent::Updated { .. } | StoreEvent::Removed { .. } => {
                self.config.filter.include_changes
            }
            StoreEvent::CountChanged { .. } => self.config.filter.include_count,
            StoreEvent::Dropped { .. } => true,
        }
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    ///
    /// Returns a handle for receiving events. Events that occur after this
    /// call are delivered in the order their mutations were applied.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size);

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    ///
    /// Safe to call from the thread draining the handle, including while a
    /// broadcast is in flight on another thread.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Send dropped event (best effort)
            let _ = sub.sender.try_send(StoreEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Broadcast an event to matching subscriptions.
    ///
    /// Drops subscribers that fail to receive.
    pub fn broadcast(&self, event: StoreEvent) {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if sub.matches(&event) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        // Remove dropped subscriptions
        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    // Try to notify about the drop (might fail, that's ok)
                    let _ = sub.sender.try_send(StoreEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::SubscriptionFilter;
    use crate::types::{Activity, ActivityId, Status, Timestamp};
    use std::time::Duration;

    fn make_test_activity(name: &str) -> Activity {
        Activity {
            id: ActivityId::generate(),
            name: name.to_string(),
            description: String::new(),
            status: Status::Pending,
            created: Timestamp::now(),
        }
    }

    fn inserted(name: &str) -> StoreEvent {
        StoreEvent::Inserted {
            index: 0,
            activity: make_test_activity(name),
        }
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig::default());
        assert_eq!(manager.subscription_count(), 1);

        manager.unsubscribe(handle.id);
        assert_eq!(manager.subscription_count(), 0);

        // Unsubscribing notifies the handle
        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert!(matches!(
            event,
            StoreEvent::Dropped {
                reason: DropReason::Unsubscribed
            }
        ));
    }

    #[test]
    fn test_broadcast_to_matching() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig::default());

        manager.broadcast(inserted("Buy milk"));

        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        match event {
            StoreEvent::Inserted { activity, .. } => {
                assert_eq!(activity.name, "Buy milk");
            }
            _ => panic!("Expected Inserted event, got {:?}", event),
        }
    }

    #[test]
    fn test_count_only_filter_skips_changes() {
        let manager = SubscriptionManager::new();
        let config = SubscriptionConfig {
            filter: SubscriptionFilter::count(),
            ..Default::default()
        };
        let handle = manager.subscribe(config);

        manager.broadcast(inserted("Buy milk"));
        manager.broadcast(StoreEvent::CountChanged { count: 1 });

        // Only the count event comes through
        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert!(matches!(event, StoreEvent::CountChanged { count: 1 }));
        assert!(handle.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_preserves_order() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig::default());

        for count in 1..=5 {
            manager.broadcast(StoreEvent::CountChanged { count });
        }

        for expected in 1..=5 {
            let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
            assert!(matches!(event, StoreEvent::CountChanged { count } if count == expected));
        }
    }

    #[test]
    fn test_drop_slow_subscriber() {
        // Small buffer
        let manager = SubscriptionManager::new();
        let config = SubscriptionConfig {
            buffer_size: 2,
            ..Default::default()
        };
        let _handle = manager.subscribe(config);

        // Flood with events
        for i in 0..10 {
            manager.broadcast(StoreEvent::CountChanged { count: i });
        }

        // Subscriber should be dropped
        assert_eq!(manager.subscription_count(), 0);
    }
}
