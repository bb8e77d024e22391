//! Merged history loading across the journal and the CSV archive.
//!
//! The tracker re-derives progress from the full completion log, so
//! the caller needs a single consistent view regardless of how far the
//! last rollup got.

use crate::{HistoryEntry, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load the full history from the journal and the CSV archive
///
/// Entries appearing in both (a rollup raced a read) are deduplicated
/// by id. Returns entries sorted by completion time, newest first.
pub fn load_history(journal_path: &Path, csv_path: &Path) -> Result<Vec<HistoryEntry>> {
    let mut entries = Vec::new();
    let mut seen_ids = HashSet::new();

    if journal_path.exists() {
        for entry in crate::journal::read_entries(journal_path)? {
            seen_ids.insert(entry.id);
            entries.push(entry);
        }
        tracing::debug!("Loaded {} entries from journal", entries.len());
    }

    if csv_path.exists() {
        let mut csv_count = 0;
        for entry in crate::archive::load_entries_from_csv(csv_path)? {
            if seen_ids.insert(entry.id) {
                entries.push(entry);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} entries from CSV archive", csv_count);
    }

    entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    tracing::info!("Loaded {} total history entries", entries.len());

    Ok(entries)
}
