//! Annotation table export.
//!
//! The record store is flattened into an [`AnnotationTable`] of five columns
//! (`Original`, `Mapped`, `Slice`, `X`, `Y`), one row per channel in channel
//! order, and written by a [`TableFormat`] implementation.
//!
//! ## Supported Formats
//!
//! - **CSV**: header row plus one line per channel, `NaN` for unplaced X/Y
//! - **JSON**: array of row objects, `null` for unplaced X/Y
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chanloc::export::{AnnotationTable, FormatRegistry};
//!
//! let registry = FormatRegistry::new();
//! let format = registry.for_path(path)?;
//! format.export(&AnnotationTable::from_store(controller.store()), path)?;
//! ```

mod csv;
mod json;
mod registry;
mod table;
mod traits;

pub use csv::CsvFormat;
pub use json::JsonFormat;
pub use registry::FormatRegistry;
pub use table::{AnnotationTable, TableRow};
pub use traits::{ExportResult, TableFormat};
