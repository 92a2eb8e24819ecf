//! Projection of the record store onto the visible slice.
//!
//! The overlay set is recomputed from scratch for the whole store: a channel
//! is visible exactly when its record sits on the active slice. Nothing here
//! touches a renderer; the shell draws whatever the set says.

use crate::model::Pixel;
use crate::store::AnnotationStore;

/// Marker/label state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub channel: u32,
    /// Label text source (the mapped channel id).
    pub label: u32,
    /// Where to draw, or `None` when hidden.
    pub position: Option<Pixel>,
}

impl Overlay {
    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }
}

/// One overlay per channel, in channel order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlaySet {
    overlays: Vec<Overlay>,
}

impl OverlaySet {
    pub fn get(&self, channel: u32) -> Option<&Overlay> {
        let index = channel.checked_sub(1)? as usize;
        self.overlays.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    /// Overlays that should be drawn.
    pub fn visible(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(|o| o.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn is_visible(&self, channel: u32) -> bool {
        self.get(channel).is_some_and(Overlay::is_visible)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Channels whose overlay differs between `self` and `newer`.
    pub fn changed_channels(&self, newer: &OverlaySet) -> Vec<u32> {
        newer
            .overlays
            .iter()
            .filter(|&o| self.get(o.channel) != Some(o))
            .map(|o| o.channel)
            .collect()
    }
}

/// Recompute every channel's overlay for `active_slice`.
pub fn refresh(store: &AnnotationStore, active_slice: u32) -> OverlaySet {
    let overlays = store
        .iter()
        .map(|record| Overlay {
            channel: record.original_channel,
            label: record.mapped_channel,
            position: if record.is_placed() && record.slice() == active_slice {
                record.point()
            } else {
                None
            },
        })
        .collect();
    OverlaySet { overlays }
}
