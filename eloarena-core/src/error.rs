use thiserror::Error;

/// Errors a session reports to its caller.
///
/// None of these end the session: the in-memory state stays valid and
/// usable after every variant, and nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `decide` was called with items that are not the current active
    /// pair, or with `winner == loser`. A stale double-submission from the
    /// UI layer lands here; nothing is mutated.
    #[error("decision does not match the active pair")]
    InvalidPair,

    /// `undo` was called with no comparisons on record.
    #[error("no comparisons to undo")]
    NoHistory,

    /// The most recent comparison references an item that has since been
    /// removed. The history entry is left in place so the caller can
    /// inspect or discard it.
    #[error("comparison references missing item \"{0}\"")]
    ReferencedItemMissing(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
