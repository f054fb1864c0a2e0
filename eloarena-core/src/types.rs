use crate::constants::DEFAULT_RATING;

/// One rankable entity.
///
/// `display_ref` is an opaque handle to whatever the item actually is
/// (a file path, a URL, a label). The engine never looks inside it;
/// rendering is the embedding application's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Unique, stable identity. Assigned at creation, never changed.
    pub id: String,
    /// Opaque reference to the item's content.
    pub display_ref: String,
    /// Current Elo rating, stored rounded to the nearest integer.
    pub rating: i32,
    /// Number of decided comparisons this item has taken part in.
    pub matches: u32,
}

impl Item {
    /// Create an item at the default rating with no matches played.
    ///
    /// Id uniqueness is the creating collaborator's contract; the session
    /// asserts it on insert.
    pub fn new(id: impl Into<String>, display_ref: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            display_ref: display_ref.into(),
            rating: DEFAULT_RATING,
            matches: 0,
        }
    }
}

/// One resolved decision: who won, who lost, when.
///
/// Records are immutable once created. The only removal path is `undo`,
/// which pops the most recent record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonRecord {
    pub winner_id: String,
    pub loser_id: String,
    /// Milliseconds since the Unix epoch, from the session's clock.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new("a1", "alpha.png");
        assert_eq!(item.rating, DEFAULT_RATING);
        assert_eq!(item.matches, 0);
        assert_eq!(item.id, "a1");
        assert_eq!(item.display_ref, "alpha.png");
    }
}
