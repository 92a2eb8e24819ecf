//! Canonical per-channel record store.
//!
//! Holds exactly one [`AnnotationRecord`] per configured channel for the
//! lifetime of a session. Records are overwritten in place, never added or
//! removed. Only the interaction controller and the undo buffer write to it;
//! everything else gets shared access.

use crate::error::{LocalizerError, Result};
use crate::model::{AnnotationRecord, ChannelMap, Pixel, Placement};
use crate::undo::PriorValue;

/// One pending write in a batch: which channel goes where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub channel: u32,
    pub slice: u32,
    pub point: Pixel,
}

impl Assignment {
    pub fn new(channel: u32, slice: u32, point: Pixel) -> Self {
        Self {
            channel,
            slice,
            point,
        }
    }
}

/// The record set, indexed by 1-based channel.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    records: Vec<AnnotationRecord>,
}

impl AnnotationStore {
    /// Create one unset record per channel in the map.
    pub fn new(channel_map: &ChannelMap) -> Self {
        let records = (1..=channel_map.len() as u32)
            .map(|channel| {
                let mapped = channel_map.get(channel).unwrap_or(channel);
                AnnotationRecord::new(channel, mapped)
            })
            .collect();
        Self { records }
    }

    /// Number of channels (N).
    pub fn channel_count(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn get(&self, channel: u32) -> Option<&AnnotationRecord> {
        let index = channel.checked_sub(1)? as usize;
        self.records.get(index)
    }

    /// All records in channel order.
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationRecord> {
        self.records.iter()
    }

    /// A channel counts as placed once its slice is nonzero.
    pub fn is_set(&self, channel: u32) -> bool {
        self.get(channel).is_some_and(AnnotationRecord::is_placed)
    }

    /// Number of placed channels.
    pub fn placed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_placed()).count()
    }

    /// Place one channel and return what it held before.
    pub(crate) fn set_single(&mut self, channel: u32, slice: u32, point: Pixel) -> Result<Placement> {
        let index = self.index_of(channel)?;
        Ok(self.write(index, Placement::at(slice, point)))
    }

    /// Place several channels at once.
    ///
    /// Every channel is validated before anything is written, so a failing
    /// batch leaves the store untouched. Priors are returned in batch order.
    pub(crate) fn set_batch(&mut self, assignments: &[Assignment]) -> Result<Vec<PriorValue>> {
        let indices = assignments
            .iter()
            .map(|a| self.index_of(a.channel))
            .collect::<Result<Vec<_>>>()?;

        let priors = assignments
            .iter()
            .zip(indices)
            .map(|(a, index)| {
                let prior = self.write(index, Placement::at(a.slice, a.point));
                PriorValue::new(a.channel, prior)
            })
            .collect();
        Ok(priors)
    }

    /// Write back a captured placement (set or unset).
    pub(crate) fn restore(&mut self, channel: u32, placement: Placement) -> Result<()> {
        let index = self.index_of(channel)?;
        self.write(index, placement);
        Ok(())
    }

    fn index_of(&self, channel: u32) -> Result<usize> {
        let count = self.channel_count();
        if channel == 0 || channel > count {
            return Err(LocalizerError::channel_out_of_range(channel, count));
        }
        Ok(channel as usize - 1)
    }

    fn write(&mut self, index: usize, placement: Placement) -> Placement {
        let record = &mut self.records[index];
        let prior = std::mem::replace(&mut record.placement, placement);
        log::debug!(
            "Channel {} (mapped {}): {:?} -> {:?}",
            record.original_channel,
            record.mapped_channel,
            prior,
            placement
        );
        prior
    }
}
