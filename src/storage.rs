//! Local persistence for the tracker.
//!
//! The whole tracker state lives in a single slot under the storage root:
//!
//! ```text
//! <root>/
//!   superthing_v6_timetable_v3.json   # Snapshot: daysState, currentDayId, streak
//! ```
//!
//! The slot is always written and read whole. There is no partial update.

use std::{fs, io, path::PathBuf};

use crate::model::Snapshot;

/// Fixed key naming the storage slot.
pub const SLOT_KEY: &str = "superthing_v6_timetable_v3";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no saved state at {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local file-based storage for the tracker snapshot.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.mission/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mission"))
    }

    /// Writes the full snapshot, replacing whatever was there.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(self.slot_path(), json)?;
        Ok(())
    }

    /// Reads the full snapshot.
    pub fn load(&self) -> Result<Snapshot> {
        let path = self.slot_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    /// Path of the storage slot.
    pub fn slot_path(&self) -> PathBuf {
        self.root.join(format!("{SLOT_KEY}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use crate::model::{Blueprint, DayState, Progress};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("mission")).unwrap();
        (dir, storage)
    }

    fn sample_snapshot() -> Snapshot {
        let blueprint = Blueprint::mission();
        let mut day = DayState::fresh(&blueprint);
        day.toggle("morning_workout", 2);
        Snapshot {
            days_state: BTreeMap::from([(1, day), (2, DayState::fresh(&blueprint))]),
            progress: Progress {
                current_day_id: 2,
                streak: 1,
            },
        }
    }

    #[test]
    fn save_and_load_snapshot() {
        let (_dir, storage) = test_storage();
        let snapshot = sample_snapshot();

        storage.save(&snapshot).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let (_dir, storage) = test_storage();
        let mut snapshot = sample_snapshot();
        storage.save(&snapshot).unwrap();

        snapshot.progress.streak = 7;
        storage.save(&snapshot).unwrap();

        assert_eq!(storage.load().unwrap().progress.streak, 7);
    }

    #[test]
    fn load_without_saved_state_is_not_found() {
        let (_dir, storage) = test_storage();
        let err = storage.load().unwrap_err();

        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn load_malformed_json_fails() {
        let (_dir, storage) = test_storage();
        fs::write(storage.slot_path(), "{ not json").unwrap();

        let err = storage.load().unwrap_err();

        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn slot_is_named_after_fixed_key() {
        let (dir, storage) = test_storage();
        storage.save(&sample_snapshot()).unwrap();

        let expected = dir
            .path()
            .join("mission")
            .join("superthing_v6_timetable_v3.json");
        assert!(expected.is_file());
    }
}
