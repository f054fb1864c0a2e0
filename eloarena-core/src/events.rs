/// Outbound notifications for the embedding UI layer.
use crate::types::{ComparisonRecord, Item};

/// Receiver for session notifications. Every method defaults to a no-op
/// so implementers only override what they observe.
///
/// `comparison_recorded` carries the running total of decided comparisons
/// so the sink can decide when a milestone is worth announcing.
pub trait EventSink {
    fn items_changed(&mut self, _items: &[Item]) {}
    fn comparison_recorded(&mut self, _record: &ComparisonRecord, _total: usize) {}
    fn undone(&mut self, _record: &ComparisonRecord) {}
}

/// Sink that ignores every notification.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {}
