//! CSV archive for rolled-up history entries.
//!
//! The journal is the hot append path; this module moves its entries
//! into a long-lived CSV file atomically, so the journal stays small
//! and the archive remains greppable.

use crate::{Difficulty, Feedback, HistoryEntry, Result};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::path::Path;
use uuid::Uuid;

/// A row in the CSV archive
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct CsvRow {
    id: String,
    user_id: String,
    workout_id: String,
    completed_at: String,
    duration_minutes: u32,
    difficulty: String,
    was_easy: bool,
    completed: bool,
    rating: u8,
}

impl From<&HistoryEntry> for CsvRow {
    fn from(entry: &HistoryEntry) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            user_id: entry.user_id.to_string(),
            workout_id: entry.workout_id.to_string(),
            completed_at: entry.completed_at.to_rfc3339(),
            duration_minutes: entry.duration_minutes,
            difficulty: difficulty_tag(entry.difficulty).into(),
            was_easy: entry.feedback.was_easy,
            completed: entry.feedback.completed,
            rating: entry.feedback.rating,
        }
    }
}

impl TryFrom<CsvRow> for HistoryEntry {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;
        let user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;
        let workout_id = Uuid::parse_str(&row.workout_id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let completed_at = DateTime::parse_from_rfc3339(&row.completed_at)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let difficulty = parse_difficulty(&row.difficulty)
            .ok_or_else(|| crate::Error::Other(format!("Invalid tier: {}", row.difficulty)))?;

        Ok(HistoryEntry {
            id,
            user_id,
            workout_id,
            completed_at,
            duration_minutes: row.duration_minutes,
            difficulty,
            feedback: Feedback {
                was_easy: row.was_easy,
                completed: row.completed,
                rating: row.rating,
            },
        })
    }
}

fn difficulty_tag(tier: Difficulty) -> &'static str {
    match tier {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}

fn parse_difficulty(s: &str) -> Option<Difficulty> {
    match s {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

/// Roll up journal entries into the CSV archive atomically
///
/// 1. Reads all entries from the journal
/// 2. Appends them to the CSV (headers written only when new)
/// 3. Syncs the CSV to disk
/// 4. Renames the journal to `.processed`
///
/// The CSV is fsynced before the journal is renamed, and the journal
/// is renamed rather than deleted so it can be recovered manually.
pub fn journal_to_csv_and_archive(journal_path: &Path, csv_path: &Path) -> Result<usize> {
    let entries = crate::journal::read_entries(journal_path)?;

    if entries.is_empty() {
        tracing::info!("No entries in journal to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;

    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} entries to CSV archive", entries.len());

    let processed_path = journal_path.with_extension("jsonl.processed");
    std::fs::rename(journal_path, &processed_path)?;

    tracing::info!("Archived journal to {:?}", processed_path);

    Ok(entries.len())
}

/// Load all entries from the CSV archive
///
/// Rows that fail to parse are skipped with a warning.
pub fn load_entries_from_csv(path: &Path) -> Result<Vec<HistoryEntry>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match HistoryEntry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(entries)
}

/// Remove processed journal files from the journal directory
pub fn cleanup_processed(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed journal: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed journal files", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{HistorySink, JsonlJournal};
    use std::fs::File;

    fn create_test_entry(minutes: u32) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            workout_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            duration_minutes: minutes,
            difficulty: Difficulty::Medium,
            feedback: Feedback {
                was_easy: true,
                completed: true,
                rating: 5,
            },
        }
    }

    #[test]
    fn test_rollup_creates_csv_and_archives_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("history.jsonl");
        let csv_path = temp_dir.path().join("history.csv");

        let mut journal = JsonlJournal::new(&journal_path);
        for i in 0..3 {
            journal.append(&create_test_entry(10 + i)).unwrap();
        }

        let count = journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        assert!(csv_path.exists());
        assert!(!journal_path.exists());
        assert!(journal_path.with_extension("jsonl.processed").exists());
    }

    #[test]
    fn test_rollup_appends_to_existing_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("history.jsonl");
        let csv_path = temp_dir.path().join("history.csv");

        let mut journal = JsonlJournal::new(&journal_path);
        journal.append(&create_test_entry(20)).unwrap();
        assert_eq!(journal_to_csv_and_archive(&journal_path, &csv_path).unwrap(), 1);

        let mut journal = JsonlJournal::new(&journal_path);
        journal.append(&create_test_entry(30)).unwrap();
        assert_eq!(journal_to_csv_and_archive(&journal_path, &csv_path).unwrap(), 1);

        let entries = load_entries_from_csv(&csv_path).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_csv_roundtrip_preserves_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("history.jsonl");
        let csv_path = temp_dir.path().join("history.csv");

        let entry = create_test_entry(60);
        let mut journal = JsonlJournal::new(&journal_path);
        journal.append(&entry).unwrap();
        journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();

        let loaded = load_entries_from_csv(&csv_path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, entry.id);
        assert_eq!(loaded[0].duration_minutes, 60);
        assert_eq!(loaded[0].difficulty, Difficulty::Medium);
        assert_eq!(loaded[0].feedback.rating, 5);
        assert!(loaded[0].feedback.was_easy);
    }

    #[test]
    fn test_empty_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("empty.jsonl");
        let csv_path = temp_dir.path().join("history.csv");

        File::create(&journal_path).unwrap();

        let count = journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_processed() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("a.jsonl.processed")).unwrap();
        File::create(temp_dir.path().join("b.jsonl.processed")).unwrap();
        File::create(temp_dir.path().join("keep.jsonl")).unwrap();

        let count = cleanup_processed(temp_dir.path()).unwrap();
        assert_eq!(count, 2);

        assert!(!temp_dir.path().join("a.jsonl.processed").exists());
        assert!(temp_dir.path().join("keep.jsonl").exists());
    }
}
