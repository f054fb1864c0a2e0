/// Stateful comparison session.
///
/// Owns the live item set, the active pair, and the decision history.
/// This is the only component with mutable state and side effects; all of
/// those side effects go through collaborators injected at construction
/// (store, random source, clock, event sink), so a session is fully
/// deterministic under test.
use log::warn;
use rand::Rng;

use crate::constants::K_FACTOR;
use crate::elo::apply_outcome;
use crate::error::{SessionError, SessionResult};
use crate::events::{EventSink, NullSink};
use crate::store::{Store, StoreError};
use crate::types::{ComparisonRecord, Item};

/// Uniform source of integers in `[0, n)`.
///
/// Injectable so pair selection is scriptable in tests. `n` is always
/// at least 1 when the session calls this.
pub trait RandomSource {
    fn next_index(&mut self, n: usize) -> usize;
}

/// Default source backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, n: usize) -> usize {
        rand::rng().random_range(0..n)
    }
}

/// Millisecond timestamps for comparison records.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock over `std::time`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Stateful controller for one ranking session.
///
/// With fewer than two items the session is Empty: no active pair, and
/// pair selection is a no-op that clears any stale pair. With two or more
/// items exactly one active pair is presented at a time, advanced by
/// `decide`, `skip`, and `undo`. There is no terminal state; a session
/// runs until `reset`.
///
/// The full item set and history are pushed to the store after every
/// mutating operation, in call order. A store failure is logged and does
/// not roll anything back: while the session runs, the in-memory state is
/// the source of truth and persistence is best-effort durability.
///
/// Operations take `&mut self`, so they are serialized by construction.
/// A rapid double-submission from an event-driven host cannot interleave;
/// the late call sees the advanced active pair and fails `InvalidPair`.
pub struct ComparisonSession {
    items: Vec<Item>,
    history: Vec<ComparisonRecord>,
    /// Ids of the pair currently presented for a decision.
    active_pair: Option<(String, String)>,
    store: Box<dyn Store>,
    random: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    sink: Box<dyn EventSink>,
}

impl ComparisonSession {
    /// Open a session on the given store with default collaborators:
    /// thread-local randomness, the system clock, and no notifications.
    pub fn open(store: Box<dyn Store>) -> Result<Self, StoreError> {
        Self::with_collaborators(
            store,
            Box::new(ThreadRandom),
            Box::new(SystemClock),
            Box::new(NullSink),
        )
    }

    /// Open a session with explicit collaborators. Loads items and history
    /// from the store and presents an initial pair when two or more items
    /// are available.
    ///
    /// Load failures are returned: a session cannot start without its
    /// initial state. After construction, store failures are only logged.
    pub fn with_collaborators(
        mut store: Box<dyn Store>,
        random: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, StoreError> {
        let items = store.load_items()?;
        let history = store.load_history()?;

        let mut session = ComparisonSession {
            items,
            history,
            active_pair: None,
            store,
            random,
            clock,
            sink,
        };
        session.select_next_pair();
        Ok(session)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn history(&self) -> &[ComparisonRecord] {
        &self.history
    }

    /// Running total of decided comparisons. Undo shrinks it.
    pub fn comparison_count(&self) -> usize {
        self.history.len()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The two items currently presented for a decision, or `None` when
    /// the session is Empty.
    pub fn active_pair(&self) -> Option<(&Item, &Item)> {
        let (a, b) = self.active_pair.as_ref()?;
        Some((self.item(a)?, self.item(b)?))
    }

    /// Choose a fresh active pair: two distinct items, uniform over
    /// unordered pairs. Clears the active pair and returns `None` when
    /// fewer than two items exist.
    pub fn select_next_pair(&mut self) -> Option<(&Item, &Item)> {
        if self.items.len() < 2 {
            self.active_pair = None;
            return None;
        }

        let first = self.random.next_index(self.items.len());
        // Resample until distinct. Each draw collides with probability
        // 1/n, so this terminates even at n == 2.
        let mut second = self.random.next_index(self.items.len());
        while second == first {
            second = self.random.next_index(self.items.len());
        }

        self.active_pair = Some((self.items[first].id.clone(), self.items[second].id.clone()));
        self.active_pair()
    }

    /// Record a decision between the two items of the active pair.
    ///
    /// Updates both ratings via one Elo step, increments both match
    /// counts, appends a history record, persists, notifies the sink, and
    /// presents a new pair. Returns the appended record.
    ///
    /// Fails with `InvalidPair` when the submitted ids are not exactly the
    /// active pair (in either order) or are not distinct; nothing is
    /// mutated in that case.
    pub fn decide(&mut self, winner_id: &str, loser_id: &str) -> SessionResult<ComparisonRecord> {
        if winner_id == loser_id {
            return Err(SessionError::InvalidPair);
        }
        let matches_active = match &self.active_pair {
            Some((a, b)) => {
                (a == winner_id && b == loser_id) || (a == loser_id && b == winner_id)
            }
            None => false,
        };
        if !matches_active {
            return Err(SessionError::InvalidPair);
        }

        let winner_idx = self.index_of(winner_id).ok_or(SessionError::InvalidPair)?;
        let loser_idx = self.index_of(loser_id).ok_or(SessionError::InvalidPair)?;

        let (new_winner, new_loser) = apply_outcome(
            self.items[winner_idx].rating,
            self.items[loser_idx].rating,
            K_FACTOR,
        );
        self.items[winner_idx].rating = new_winner;
        self.items[winner_idx].matches += 1;
        self.items[loser_idx].rating = new_loser;
        self.items[loser_idx].matches += 1;

        let record = ComparisonRecord {
            winner_id: winner_id.to_string(),
            loser_id: loser_id.to_string(),
            timestamp: self.clock.now_millis(),
        };
        self.history.push(record.clone());

        self.persist();
        self.sink.items_changed(&self.items);
        self.sink.comparison_recorded(&record, self.history.len());
        self.select_next_pair();

        Ok(record)
    }

    /// Discard the active pair without touching any rating or match count
    /// and present a new one.
    pub fn skip(&mut self) -> Option<(&Item, &Item)> {
        self.select_next_pair()
    }

    /// Reverse the most recent decision.
    ///
    /// The reversal replays the comparison with the roles swapped (the
    /// original loser "wins" one match back), which restores match counts
    /// exactly and ratings to within the rounding tolerance of one Elo
    /// step. The undone pair is re-presented as the active pair so the
    /// user can re-decide it.
    ///
    /// Fails with `NoHistory` when there is nothing to undo, and with
    /// `ReferencedItemMissing` when either participant has since been
    /// removed; in both cases the history is left untouched.
    pub fn undo(&mut self) -> SessionResult<ComparisonRecord> {
        let record = self.history.last().cloned().ok_or(SessionError::NoHistory)?;

        let winner_idx = self
            .index_of(&record.winner_id)
            .ok_or_else(|| SessionError::ReferencedItemMissing(record.winner_id.clone()))?;
        let loser_idx = self
            .index_of(&record.loser_id)
            .ok_or_else(|| SessionError::ReferencedItemMissing(record.loser_id.clone()))?;
        self.history.pop();

        let (new_loser, new_winner) = apply_outcome(
            self.items[loser_idx].rating,
            self.items[winner_idx].rating,
            K_FACTOR,
        );
        self.items[loser_idx].rating = new_loser;
        self.items[winner_idx].rating = new_winner;
        // Floored at zero in case history and match counts ever desync.
        self.items[winner_idx].matches = self.items[winner_idx].matches.saturating_sub(1);
        self.items[loser_idx].matches = self.items[loser_idx].matches.saturating_sub(1);

        self.active_pair = Some((record.winner_id.clone(), record.loser_id.clone()));

        self.persist();
        self.sink.items_changed(&self.items);
        self.sink.undone(&record);

        Ok(record)
    }

    /// Clear all items and all history together. From the caller's point
    /// of view both are gone atomically; the store is cleared in the same
    /// call so no stale write can resurrect the old data.
    pub fn reset(&mut self) {
        self.items.clear();
        self.history.clear();
        self.active_pair = None;
        if let Err(err) = self.store.clear() {
            warn!("failed to clear store: {err}");
        }
        self.sink.items_changed(&self.items);
    }

    /// Register items created by the caller. When the session was Empty
    /// and now has two or more items, an initial pair is presented.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate id. Id uniqueness is the creating
    /// collaborator's contract, so a duplicate here is a caller bug.
    pub fn insert_items(&mut self, new_items: Vec<Item>) {
        for item in new_items {
            assert!(
                self.index_of(&item.id).is_none(),
                "Duplicate item id: {}",
                item.id
            );
            self.items.push(item);
        }

        self.persist();
        self.sink.items_changed(&self.items);
        if self.active_pair.is_none() {
            self.select_next_pair();
        }
    }

    /// Remove an item from the session. History records that reference it
    /// are kept; an undo that reaches one reports `ReferencedItemMissing`.
    /// Returns false when no item has the given id.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.items.remove(idx);

        let pair_broken = self
            .active_pair
            .as_ref()
            .is_some_and(|(a, b)| a == id || b == id);
        if pair_broken || self.items.len() < 2 {
            self.select_next_pair();
        }

        self.persist();
        self.sink.items_changed(&self.items);
        true
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Push the current state to the store. Failures are logged; the
    /// in-memory state stays authoritative.
    fn persist(&mut self) {
        if let Err(err) = self.store.save_items(&self.items) {
            warn!("failed to persist items: {err}");
        }
        if let Err(err) = self.store.save_history(&self.history) {
            warn!("failed to persist history: {err}");
        }
    }
}
