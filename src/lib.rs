//! # Agenda
//!
//! A single-user activity store: short textual records with a name,
//! description, and completion status, kept in insertion order, persisted
//! as one durable document, and observable through a live change stream.
//!
//! ## Core Concepts
//!
//! - **Activities**: Immutable value records with identity-based equality
//! - **Store**: The canonical ordered collection, upsert/remove by id
//! - **Repository**: CRUD façade that flushes after every mutation and
//!   publishes change and count events
//! - **Builder**: Disposable edit session with dirty tracking and
//!   commit-time validation
//!
//! ## Example
//!
//! ```ignore
//! use agenda::{ActivityBuilder, ActivityRepository, EditMode, FileArchive};
//!
//! let repository = ActivityRepository::new(Box::new(FileArchive::new(
//!     FileArchive::default_dir(),
//! )));
//!
//! // Create an activity through an edit session
//! let mut builder = ActivityBuilder::new(EditMode::New);
//! builder.set_name("Buy milk");
//! let activity = builder.build()?;
//! repository.commit(activity);
//!
//! // Observe changes
//! let handle = repository.subscribe(Default::default());
//! ```

pub mod archive;
pub mod builder;
pub mod error;
pub mod repository;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use archive::{ActivityArchive, FileArchive, MemoryArchive};
pub use builder::{ActivityBuilder, EditMode, DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};
pub use error::{ErrorMessage, Result, StoreError, ValidationError};
pub use repository::ActivityRepository;
pub use store::ActivityStore;
pub use subscriptions::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::{Activity, ActivityId, Status, Timestamp};
