/// File-backed storage: one JSON document holding items and results.
///
/// The whole document is rewritten after each mutation, in call order.
/// There is no deferred batching, so a reset can never be overtaken by a
/// stale write.
use eloarena_core::{ComparisonRecord, Item, Store, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk document shape, shared with backups.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub results: Vec<ComparisonRecord>,
}

/// Read a data document. A missing file is an empty document; a corrupt
/// one is an error (never silently discarded).
pub fn read_data_file(path: &Path) -> Result<DataFile, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map_err(|e| StoreError::new(format!("corrupt data file {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DataFile::default()),
        Err(e) => Err(StoreError::new(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

/// Write a data document, creating parent directories as needed.
pub fn write_data_file(path: &Path, data: &DataFile) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::new(format!("failed to create directory {}: {e}", parent.display()))
        })?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| StoreError::new(format!("failed to encode data: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| StoreError::new(format!("failed to write {}: {e}", path.display())))?;
    Ok(())
}

/// `Store` implementation over a single JSON file.
pub struct JsonStore {
    path: PathBuf,
    data: DataFile,
}

impl JsonStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let data = read_data_file(&path)?;
        Ok(JsonStore { path, data })
    }

    fn write(&self) -> Result<(), StoreError> {
        write_data_file(&self.path, &self.data)
    }
}

impl Store for JsonStore {
    fn load_items(&mut self) -> Result<Vec<Item>, StoreError> {
        Ok(self.data.items.clone())
    }

    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.data.items = items.to_vec();
        self.write()
    }

    fn load_history(&mut self) -> Result<Vec<ComparisonRecord>, StoreError> {
        Ok(self.data.results.clone())
    }

    fn save_history(&mut self, history: &[ComparisonRecord]) -> Result<(), StoreError> {
        self.data.results = history.to_vec();
        self.write()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.data = DataFile::default();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("eloarena-test-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = temp_path("round-trip");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonStore::open(path.clone()).unwrap();
        let items = vec![Item::new("a", "alpha.png")];
        store.save_items(&items).unwrap();
        store
            .save_history(&[ComparisonRecord {
                winner_id: "a".into(),
                loser_id: "b".into(),
                timestamp: 42,
            }])
            .unwrap();

        let mut reopened = JsonStore::open(path.clone()).unwrap();
        assert_eq!(reopened.load_items().unwrap(), items);
        assert_eq!(reopened.load_history().unwrap().len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let mut store = JsonStore::open(path).unwrap();
        assert!(store.load_items().unwrap().is_empty());
        assert!(store.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        assert!(JsonStore::open(path.clone()).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_clear_removes_the_file() {
        let path = temp_path("clear");
        let mut store = JsonStore::open(path.clone()).unwrap();
        store.save_items(&[Item::new("a", "alpha.png")]).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.load_items().unwrap().is_empty());
    }
}
