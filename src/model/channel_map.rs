//! Lookup from sequential channel index to physical channel id.

use crate::error::{LocalizerError, Result};

/// Maps channel `1..=N` to a remapped (physical/device) identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    mapping: Vec<u32>,
}

impl ChannelMap {
    /// Identity map `1..=count`.
    pub fn identity(count: u32) -> Self {
        Self {
            mapping: (1..=count).collect(),
        }
    }

    /// Use an explicit mapping; its length must equal `count`.
    pub fn from_vec(mapping: Vec<u32>, count: u32) -> Result<Self> {
        if mapping.len() != count as usize {
            return Err(LocalizerError::ChannelMapLength {
                expected: count as usize,
                found: mapping.len(),
            });
        }
        Ok(Self { mapping })
    }

    /// Explicit map if given, identity otherwise.
    pub fn from_config(mapping: Option<&[u32]>, count: u32) -> Result<Self> {
        match mapping {
            Some(m) => Self::from_vec(m.to_vec(), count),
            None => Ok(Self::identity(count)),
        }
    }

    /// Mapped id for a 1-based channel, or `None` when out of range.
    pub fn get(&self, channel: u32) -> Option<u32> {
        let index = channel.checked_sub(1)? as usize;
        self.mapping.get(index).copied()
    }

    /// Number of channels covered.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.mapping
            .iter()
            .enumerate()
            .all(|(i, &m)| m as usize == i + 1)
    }
}
