//! Subscription system for live store updates.
//!
//! This module provides in-process subscriptions to change events:
//! - Inserts, in-place updates, and removals of activities
//! - Count changes published by the repository
//!
//! Subscriptions use bounded buffers; a subscriber that stops draining its
//! handle is disconnected rather than observing a gappy stream.
//!
//! # Example
//!
//! ```ignore
//! let handle = repository.subscribe(SubscriptionConfig::default());
//!
//! loop {
//!     match handle.recv() {
//!         Ok(StoreEvent::Inserted { index, activity }) => println!("new: {:?}", activity),
//!         Ok(StoreEvent::CountChanged { count }) => println!("count: {count}"),
//!         Ok(StoreEvent::Dropped { .. }) | Err(_) => break,
//!         Ok(_) => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId,
};
