//! Core types for the activity store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Unique identifier for an activity.
///
/// Assigned once when an edit session for a new activity is opened and
/// immutable for the lifetime of the record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(pub Uuid);

impl ActivityId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        ActivityId(Uuid::new_v4())
    }
}

impl fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityId({})", self.0)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Microseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Completion status of an activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Done,
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

/// A single activity record.
///
/// Activities are immutable values: "editing" one means building a
/// replacement through an [`ActivityBuilder`](crate::ActivityBuilder) and
/// committing it over the same id. Equality is identity equality: two
/// activities compare equal iff their ids match, regardless of content.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier (assigned at creation).
    pub id: ActivityId,

    /// Display name, 1-50 characters at commit time.
    pub name: String,

    /// Free-form description, up to 200 characters. May be empty; an absent
    /// field in stored data deserializes to the empty string.
    #[serde(default)]
    pub description: String,

    /// Completion status.
    #[serde(default)]
    pub status: Status,

    /// When the activity was created (assigned once).
    pub created: Timestamp,
}

impl PartialEq for Activity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Activity {}

impl Hash for Activity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
