//! Per-channel annotation records.

use serde::{Deserialize, Serialize};

use crate::constants::UNSET_SLICE;
use crate::model::Pixel;

/// Where a channel was placed: the slice id plus its pixel, if any.
///
/// A placement with `slice == 0` is unset and carries no pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub slice: u32,
    pub point: Option<Pixel>,
}

impl Placement {
    /// The placement every record starts with.
    pub const UNSET: Placement = Placement {
        slice: UNSET_SLICE,
        point: None,
    };

    /// Placement on `slice` at `point`.
    pub fn at(slice: u32, point: Pixel) -> Self {
        Self {
            slice,
            point: Some(point),
        }
    }

    /// Whether this placement refers to a real slice.
    pub fn is_set(&self) -> bool {
        self.slice != UNSET_SLICE
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::UNSET
    }
}

/// One row of the annotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// The channel index itself (1-based). Fixed at creation.
    pub original_channel: u32,
    /// Physical channel id from the channel map. Fixed at creation.
    pub mapped_channel: u32,
    /// Current placement of this channel.
    pub placement: Placement,
}

impl AnnotationRecord {
    /// Create an unset record for a channel.
    pub fn new(original_channel: u32, mapped_channel: u32) -> Self {
        Self {
            original_channel,
            mapped_channel,
            placement: Placement::UNSET,
        }
    }

    /// Whether the channel has been placed on a slice.
    pub fn is_placed(&self) -> bool {
        self.placement.is_set()
    }

    pub fn slice(&self) -> u32 {
        self.placement.slice
    }

    pub fn point(&self) -> Option<Pixel> {
        self.placement.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unset() {
        let record = AnnotationRecord::new(3, 17);
        assert_eq!(record.original_channel, 3);
        assert_eq!(record.mapped_channel, 17);
        assert!(!record.is_placed());
        assert_eq!(record.slice(), 0);
        assert_eq!(record.point(), None);
    }

    #[test]
    fn test_placement_at() {
        let placement = Placement::at(5, Pixel::new(1, 2));
        assert!(placement.is_set());
        assert_eq!(placement.point, Some(Pixel::new(1, 2)));
        assert!(!Placement::default().is_set());
    }
}
