//! Durable storage for the activity collection.
//!
//! The unit of durability is the whole collection: every save rewrites one
//! JSON document holding all activities, atomically. First run and a corrupt
//! file are treated identically: the archive loads as empty.

use crate::error::Result;
use crate::types::Activity;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// File name of the archived collection.
const ARCHIVE_FILE_NAME: &str = "activities.json";

/// Sibling lock file serializing concurrent flushes.
const LOCK_FILE_NAME: &str = "activities.lock";

/// Storage seam for the activity collection.
///
/// `load` never fails the caller: a missing or unreadable archive yields an
/// empty collection. `save` replaces the entire stored collection or fails
/// without leaving a partial file visible.
pub trait ActivityArchive: Send {
    /// Read the full collection. Absent or corrupt storage reads as empty.
    fn load(&self) -> Vec<Activity>;

    /// Write the full collection, atomically replacing any prior content.
    fn save(&self, activities: &[Activity]) -> Result<()>;
}

/// File-backed archive.
///
/// Writes go to a dot-prefixed temporary sibling, are fsynced, then renamed
/// over the archive file. An exclusive lock on a sibling lock file ensures
/// two flushes of the same archive never interleave their writes.
pub struct FileArchive {
    path: PathBuf,
}

impl FileArchive {
    /// Create an archive at `dir/activities.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(ARCHIVE_FILE_NAME),
        }
    }

    /// The per-user default archive directory.
    ///
    /// Falls back to the current directory when the platform reports no
    /// data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("agenda"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Path of the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_file_name(LOCK_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_file_name(format!(".{}.tmp", ARCHIVE_FILE_NAME))
    }

    fn acquire_lock(&self) -> Result<File> {
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(self.lock_path())?;
        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }
}

impl ActivityArchive for FileArchive {
    fn load(&self) -> Vec<Activity> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                // First run or unreadable file: start empty
                warn!(path = %self.path.display(), error = %e, "archive not read, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(activities) => {
                debug!(path = %self.path.display(), "archive loaded");
                activities
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "archive corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, activities: &[Activity]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let _lock = self.acquire_lock()?;

        let encoded = serde_json::to_vec_pretty(activities)?;

        let temp_path = self.temp_path();
        let mut temp_file = File::create(&temp_path)?;
        temp_file.write_all(&encoded)?;
        temp_file.sync_all()?;
        drop(temp_file);

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            error!(path = %self.path.display(), error = %e, "archive rename failed");
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!(path = %self.path.display(), count = activities.len(), "archive saved");
        Ok(())
    }
}

/// In-memory archive for tests and previews.
///
/// Pre-seeded contents stand in for stored data; saves replace them.
#[derive(Default)]
pub struct MemoryArchive {
    activities: parking_lot::Mutex<Vec<Activity>>,
}

impl MemoryArchive {
    /// An archive that loads as empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// An archive pre-seeded with `activities`.
    pub fn with_activities(activities: Vec<Activity>) -> Self {
        Self {
            activities: parking_lot::Mutex::new(activities),
        }
    }
}

impl ActivityArchive for MemoryArchive {
    fn load(&self) -> Vec<Activity> {
        self.activities.lock().clone()
    }

    fn save(&self, activities: &[Activity]) -> Result<()> {
        *self.activities.lock() = activities.to_vec();
        Ok(())
    }
}
