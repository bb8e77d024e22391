//! Record store for profile and progress documents.
//!
//! Each record kind lives in its own JSON file under the data
//! directory. Reads take a shared lock; writes go through a locked
//! temp file and an atomic rename. The engine itself never touches
//! this layer - the CLI reads before invoking an engine operation and
//! writes the result after.

use crate::{Error, Progress, Result, UserProfile};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-backed store for a user's profile and progress records
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the profile record
    pub fn profile_path(&self) -> PathBuf {
        self.root.join("profile.json")
    }

    /// Path of the progress record
    pub fn progress_path(&self) -> PathBuf {
        self.root.join("progress.json")
    }

    /// Path of the history journal
    pub fn journal_path(&self) -> PathBuf {
        self.root.join("journal").join("history.jsonl")
    }

    /// Path of the CSV archive
    pub fn archive_path(&self) -> PathBuf {
        self.root.join("history.csv")
    }

    /// Load the onboarded profile, if one exists
    pub fn load_profile(&self) -> Result<Option<UserProfile>> {
        load_record(&self.profile_path())
    }

    /// Persist the profile record
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        save_record(&self.profile_path(), profile)
    }

    /// Load the progress record; absent before the first completion
    pub fn load_progress(&self) -> Result<Option<Progress>> {
        load_record(&self.progress_path())
    }

    /// Persist the progress record
    pub fn save_progress(&self, progress: &Progress) -> Result<()> {
        save_record(&self.progress_path(), progress)
    }
}

/// Load a JSON record with a shared lock
///
/// Returns `None` when the file does not exist. A corrupt record is an
/// error - unlike defaults-tolerant state, silently discarding a
/// profile or progress record would lose user data.
fn load_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        tracing::debug!("No record at {:?}", path);
        return Ok(None);
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    let read_result = reader.read_to_string(&mut contents);
    file.unlock()?;
    read_result?;

    let record = serde_json::from_str(&contents)
        .map_err(|e| Error::Store(format!("Corrupt record at {:?}: {}", path, e)))?;
    tracing::debug!("Loaded record from {:?}", path);
    Ok(Some(record))
}

/// Atomically write a JSON record
///
/// Writes to a locked temp file in the same directory, syncs, then
/// renames over the target.
fn save_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "record path missing parent")
    })?)?;

    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(record)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved record to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BodyType, Difficulty, ExperienceLevel, SessionLength};
    use chrono::Utc;
    use uuid::Uuid;

    fn test_profile() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: "Alex".into(),
            experience: ExperienceLevel::Intermediate,
            body_type: BodyType::Ectomorph,
            goals: vec!["endurance".into(), "general_health".into()],
            preferred_length: SessionLength::Thirty,
            created_at: Utc::now(),
        }
    }

    fn test_progress() -> Progress {
        Progress {
            user_id: Uuid::new_v4(),
            total_workouts: 12,
            total_minutes: 340,
            current_streak: 4,
            longest_streak: 7,
            weekly_consistency: 75,
            last_workout_date: Some(Utc::now()),
            difficulty_level: Difficulty::Medium,
        }
    }

    #[test]
    fn test_profile_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        let profile = test_profile();
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile().unwrap().unwrap();
        assert_eq!(loaded.id, profile.id);
        assert_eq!(loaded.name, "Alex");
        assert_eq!(loaded.goals.len(), 2);
    }

    #[test]
    fn test_progress_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        let progress = test_progress();
        store.save_progress(&progress).unwrap();

        let loaded = store.load_progress().unwrap().unwrap();
        assert_eq!(loaded.longest_streak, 7);
        assert_eq!(loaded.weekly_consistency, 75);
    }

    #[test]
    fn test_load_missing_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.load_profile().unwrap().is_none());
        assert!(store.load_progress().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        std::fs::write(store.profile_path(), "{ invalid json }").unwrap();

        let result = store.load_profile();
        assert!(matches!(result, Err(Error::Store(_))));
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.save_progress(&test_progress()).unwrap();

        assert!(store.progress_path().exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "progress.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only progress.json, found extras: {:?}",
            extras
        );
    }
}
