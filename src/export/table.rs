//! Flat table view of the record store.

use serde::{Deserialize, Serialize};

use crate::store::AnnotationStore;

/// One exported row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Original")]
    pub original: u32,
    #[serde(rename = "Mapped")]
    pub mapped: u32,
    #[serde(rename = "Slice")]
    pub slice: u32,
    #[serde(rename = "X")]
    pub x: Option<i32>,
    #[serde(rename = "Y")]
    pub y: Option<i32>,
}

/// Column names in export order.
pub const COLUMNS: [&str; 5] = ["Original", "Mapped", "Slice", "X", "Y"];

/// All rows, in channel order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationTable {
    pub rows: Vec<TableRow>,
}

impl AnnotationTable {
    /// Snapshot the store. The store itself is read, never copied per slice.
    pub fn from_store(store: &AnnotationStore) -> Self {
        let rows = store
            .iter()
            .map(|record| {
                let point = record.point();
                TableRow {
                    original: record.original_channel,
                    mapped: record.mapped_channel,
                    slice: record.slice(),
                    x: point.map(|p| p.x),
                    y: point.map(|p| p.y),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with a nonzero slice.
    pub fn placed_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.slice != 0).count()
    }
}
