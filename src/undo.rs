//! Single-level undo for placement mutations.
//!
//! Every mutation captures the pre-mutation placements of the channels it
//! touched. Only the most recent capture is kept: recording a new one drops
//! the previous entry, and applying it empties the buffer.

use crate::model::Placement;
use crate::store::AnnotationStore;

/// A channel and what it held before the last mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorValue {
    pub channel: u32,
    pub placement: Placement,
}

impl PriorValue {
    pub fn new(channel: u32, placement: Placement) -> Self {
        Self { channel, placement }
    }
}

/// Prior values of one mutation batch, in the order they were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    priors: Vec<PriorValue>,
}

impl UndoEntry {
    pub fn new(priors: Vec<PriorValue>) -> Self {
        Self { priors }
    }

    /// Human-readable description for logs and status lines.
    pub fn description(&self) -> String {
        match self.priors.as_slice() {
            [single] => format!("Place channel {}", single.channel),
            priors => format!("Place {} channels", priors.len()),
        }
    }

    pub fn priors(&self) -> &[PriorValue] {
        &self.priors
    }

    pub fn len(&self) -> usize {
        self.priors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priors.is_empty()
    }
}

/// One-slot undo buffer.
#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    entry: Option<UndoEntry>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is buffered with `entry`.
    pub fn record(&mut self, entry: UndoEntry) {
        if let Some(dropped) = self.entry.as_ref() {
            log::debug!("Undo: dropping '{}'", dropped.description());
        }
        log::debug!("Undo: recorded '{}'", entry.description());
        self.entry = Some(entry);
    }

    pub fn can_undo(&self) -> bool {
        self.entry.is_some()
    }

    /// Description of what undo would revert.
    pub fn undo_description(&self) -> Option<String> {
        self.entry.as_ref().map(UndoEntry::description)
    }

    /// Write the buffered priors back into `store` and empty the buffer.
    ///
    /// Returns the restored priors (channel plus the placement it now has),
    /// or an empty list when nothing was buffered.
    pub fn pop_and_apply(&mut self, store: &mut AnnotationStore) -> Vec<PriorValue> {
        let Some(entry) = self.entry.take() else {
            log::debug!("Undo: nothing to undo");
            return Vec::new();
        };

        // Reverse order so a channel touched twice ends at its oldest value.
        let mut applied = Vec::with_capacity(entry.len());
        for prior in entry.priors.iter().rev() {
            match store.restore(prior.channel, prior.placement) {
                Ok(()) => applied.push(*prior),
                Err(e) => log::warn!("Undo: skipping channel {}: {}", prior.channel, e),
            }
        }
        applied.reverse();

        log::debug!("Undo: reverted '{}'", entry.description());
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChannelMap, Pixel};
    use crate::store::Assignment;

    fn store(n: u32) -> AnnotationStore {
        AnnotationStore::new(&ChannelMap::identity(n))
    }

    #[test]
    fn test_empty_buffer_is_noop() {
        let mut buffer = UndoBuffer::new();
        let mut store = store(4);
        assert!(!buffer.can_undo());
        assert!(buffer.pop_and_apply(&mut store).is_empty());
        assert_eq!(store.placed_count(), 0);
    }

    #[test]
    fn test_single_round_trip() {
        let mut buffer = UndoBuffer::new();
        let mut store = store(4);
        store.set_single(1, 3, Pixel::new(5, 5)).unwrap();
        let before = *store.get(1).unwrap();

        let prior = store.set_single(1, 4, Pixel::new(8, 8)).unwrap();
        buffer.record(UndoEntry::new(vec![PriorValue::new(1, prior)]));

        let applied = buffer.pop_and_apply(&mut store);
        assert_eq!(applied, vec![PriorValue::new(1, before.placement)]);
        assert_eq!(*store.get(1).unwrap(), before);
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_second_undo_is_noop() {
        let mut buffer = UndoBuffer::new();
        let mut store = store(4);
        let prior = store.set_single(2, 1, Pixel::new(1, 1)).unwrap();
        buffer.record(UndoEntry::new(vec![PriorValue::new(2, prior)]));

        buffer.pop_and_apply(&mut store);
        let snapshot = store.records().to_vec();
        assert!(buffer.pop_and_apply(&mut store).is_empty());
        assert_eq!(store.records(), snapshot.as_slice());
    }

    #[test]
    fn test_record_replaces_previous() {
        let mut buffer = UndoBuffer::new();
        let mut store = store(4);

        let first = store.set_single(1, 1, Pixel::new(1, 1)).unwrap();
        buffer.record(UndoEntry::new(vec![PriorValue::new(1, first)]));
        let priors = store
            .set_batch(&[
                Assignment::new(2, 1, Pixel::new(2, 2)),
                Assignment::new(3, 1, Pixel::new(3, 3)),
            ])
            .unwrap();
        buffer.record(UndoEntry::new(priors));
        assert_eq!(buffer.undo_description().as_deref(), Some("Place 2 channels"));

        let applied = buffer.pop_and_apply(&mut store);
        assert_eq!(applied.len(), 2);
        assert!(store.is_set(1), "only the last batch is undone");
        assert!(!store.is_set(2));
        assert!(!store.is_set(3));
    }

    #[test]
    fn test_descriptions() {
        let single = UndoEntry::new(vec![PriorValue::new(7, Placement::UNSET)]);
        assert_eq!(single.description(), "Place channel 7");
    }
}
