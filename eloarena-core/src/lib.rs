/// eloarena-core: pairwise Elo ranking engine.
///
/// One binary choice at a time → Elo ratings → ranked list. No IO of its
/// own: persistence, randomness, time, and outbound notifications are
/// collaborators injected at construction, so a session is fully
/// deterministic under test. Bring your own UI.
///
/// Pairs are chosen uniformly at random among the current items. That is
/// deliberate: it trades convergence speed for simplicity and makes the
/// comparison order impossible to game.
///
/// # Quick start
///
/// ```rust
/// use eloarena_core::{ComparisonSession, Item, MemoryStore};
///
/// let mut session = ComparisonSession::open(Box::new(MemoryStore::new())).unwrap();
/// session.insert_items(vec![
///     Item::new("a", "alpha.png"),
///     Item::new("b", "beta.png"),
/// ]);
///
/// let (winner, loser) = {
///     let (left, right) = session.active_pair().expect("two items give a pair");
///     (left.id.clone(), right.id.clone())
/// };
/// session.decide(&winner, &loser).unwrap();
///
/// for item in session.items() {
///     println!("{}: {} ({} matches)", item.display_ref, item.rating, item.matches);
/// }
/// ```

pub mod constants;
pub mod elo;
pub mod error;
pub mod events;
pub mod session;
pub mod store;
pub mod types;

// Re-export primary public API at crate root.
pub use error::{SessionError, SessionResult};
pub use events::{EventSink, NullSink};
pub use session::{Clock, ComparisonSession, RandomSource, SystemClock, ThreadRandom};
pub use store::{MemoryStore, Store, StoreError};
pub use types::{ComparisonRecord, Item};
