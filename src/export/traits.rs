//! Trait definitions for table format implementations.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::table::AnnotationTable;

/// Trait for annotation table writers.
///
/// Each format renders the whole table to a string; writing to disk is
/// shared through the default [`TableFormat::export`].
pub trait TableFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "csv", "json").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format uses (lowercase, without dots).
    fn extensions(&self) -> &[&'static str];

    /// Render the table.
    fn render(&self, table: &AnnotationTable) -> Result<String>;

    /// Render the table and write it to `path`.
    fn export(&self, table: &AnnotationTable, path: &Path) -> Result<ExportResult> {
        log::info!("Exporting {} rows as {} to {:?}", table.len(), self.id(), path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render(table)?)?;

        Ok(ExportResult {
            path: path.to_path_buf(),
            rows_exported: table.len(),
            rows_placed: table.placed_rows(),
        })
    }
}

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// File that was written
    pub path: PathBuf,
    /// Total rows written (one per channel)
    pub rows_exported: usize,
    /// Rows that had a placement
    pub rows_placed: usize,
}
