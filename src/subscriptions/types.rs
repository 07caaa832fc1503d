//! Subscription types for live store updates.

use crate::types::Activity;
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before the subscriber is dropped.
    /// Default: 1000
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1000,
            filter: SubscriptionFilter::default(),
        }
    }
}

/// Filter criteria for subscriptions.
///
/// The default receives everything. A subscriber interested only in the
/// live count can use [`SubscriptionFilter::count`] and never sees the
/// per-record change events.
#[derive(Clone, Copy, Debug)]
pub struct SubscriptionFilter {
    /// Include insert/update/remove events.
    pub include_changes: bool,

    /// Include count-changed events.
    pub include_count: bool,
}

impl Default for SubscriptionFilter {
    fn default() -> Self {
        Self {
            include_changes: true,
            include_count: true,
        }
    }
}

impl SubscriptionFilter {
    /// Subscribe to change events only.
    pub fn changes() -> Self {
        Self {
            include_changes: true,
            include_count: false,
        }
    }

    /// Subscribe to count changes only.
    pub fn count() -> Self {
        Self {
            include_changes: false,
            include_count: true,
        }
    }

    /// Subscribe to everything.
    pub fn all() -> Self {
        Self::default()
    }
}

/// Events emitted to subscribers.
///
/// Change events are enqueued synchronously with the mutation that caused
/// them, in mutation order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A new activity was appended at `index`.
    Inserted { index: usize, activity: Activity },

    /// The activity at `index` was replaced in place.
    Updated { index: usize, activity: Activity },

    /// The activity formerly at `index` was removed.
    Removed { index: usize, activity: Activity },

    /// The collection count changed. Published by the repository only when
    /// the count actually differs from its previous value.
    CountChanged { count: usize },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<StoreEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<StoreEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<StoreEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<StoreEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain all currently buffered events.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.receiver.try_iter().collect()
    }
}
