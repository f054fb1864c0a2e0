/// Persistence boundary.
///
/// The session pushes its full item set and history through a `Store`
/// after every mutating operation and never reads them back mid-session;
/// the in-memory state is authoritative while the session runs. Backends
/// may batch or defer writes internally as long as they apply them in
/// call order.
use thiserror::Error;

use crate::types::{ComparisonRecord, Item};

/// Failure reported by a storage backend.
///
/// The session logs these and carries on; only the constructors propagate
/// them, since a session cannot start without its initial state.
#[derive(Debug, Error)]
#[error("storage error: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError { message: message.into() }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::new(err.to_string())
    }
}

/// Storage collaborator: items and history are persisted independently
/// but cleared together.
pub trait Store {
    fn load_items(&mut self) -> Result<Vec<Item>, StoreError>;
    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError>;
    fn load_history(&mut self) -> Result<Vec<ComparisonRecord>, StoreError>;
    fn save_history(&mut self, history: &[ComparisonRecord]) -> Result<(), StoreError>;
    /// Remove both collections. Must leave no pending write that could
    /// resurrect the old data afterwards.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<Item>,
    history: Vec<ComparisonRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed the store with pre-existing state, as if loaded from disk.
    pub fn with_state(items: Vec<Item>, history: Vec<ComparisonRecord>) -> Self {
        MemoryStore { items, history }
    }
}

impl Store for MemoryStore {
    fn load_items(&mut self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.clone())
    }

    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.items = items.to_vec();
        Ok(())
    }

    fn load_history(&mut self) -> Result<Vec<ComparisonRecord>, StoreError> {
        Ok(self.history.clone())
    }

    fn save_history(&mut self, history: &[ComparisonRecord]) -> Result<(), StoreError> {
        self.history = history.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.history.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let items = vec![Item::new("a", "alpha"), Item::new("b", "beta")];
        let history = vec![ComparisonRecord {
            winner_id: "a".into(),
            loser_id: "b".into(),
            timestamp: 1_000,
        }];

        store.save_items(&items).unwrap();
        store.save_history(&history).unwrap();
        assert_eq!(store.load_items().unwrap(), items);
        assert_eq!(store.load_history().unwrap(), history);
    }

    #[test]
    fn test_memory_store_clear_empties_both_collections() {
        let mut store = MemoryStore::with_state(
            vec![Item::new("a", "alpha")],
            vec![ComparisonRecord {
                winner_id: "a".into(),
                loser_id: "b".into(),
                timestamp: 0,
            }],
        );

        store.clear().unwrap();
        assert!(store.load_items().unwrap().is_empty());
        assert!(store.load_history().unwrap().is_empty());
    }
}
