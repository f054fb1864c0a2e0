/// Export and import of the data document as a standalone backup file.
use chrono::Local;
use log::warn;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::bail;
use crate::store::{read_data_file, write_data_file, DataFile};

/// Default backup filename in the current directory, stamped with today's
/// date: eloarena-backup-YYYY-MM-DD.json
pub fn default_backup_path() -> PathBuf {
    PathBuf::from(format!(
        "eloarena-backup-{}.json",
        Local::now().format("%Y-%m-%d")
    ))
}

/// Export the current data document to a backup file.
pub fn export(data_path: &Path, backup_path: &Path) {
    let data = read_data_file(data_path).unwrap_or_else(|e| bail(e));
    if data.items.is_empty() {
        bail("No data to export");
    }
    write_data_file(backup_path, &data).unwrap_or_else(|e| bail(e));
}

/// Import a backup file, replacing the current data document.
///
/// The structure is validated by the typed parse; on top of that, history
/// entries referencing unknown item ids are reported but kept, and
/// duplicate item ids are rejected outright.
pub fn import(backup_path: &Path, data_path: &Path) -> DataFile {
    if !backup_path.exists() {
        bail(format!("Backup file not found: {}", backup_path.display()));
    }
    let data = read_data_file(backup_path)
        .unwrap_or_else(|e| bail(format!("Invalid backup file: {e}")));

    let mut ids = HashSet::new();
    for item in &data.items {
        if !ids.insert(item.id.as_str()) {
            bail(format!("Invalid backup file: duplicate item id \"{}\"", item.id));
        }
    }
    for record in &data.results {
        if !ids.contains(record.winner_id.as_str()) || !ids.contains(record.loser_id.as_str()) {
            warn!(
                "backup history references unknown items ({} vs {})",
                record.winner_id, record.loser_id
            );
        }
    }

    write_data_file(data_path, &data).unwrap_or_else(|e| bail(e));
    data
}
