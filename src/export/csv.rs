//! CSV table format.

use crate::error::Result;
use crate::export::table::{AnnotationTable, COLUMNS};
use crate::export::traits::TableFormat;

/// Comma-separated table with a header row.
///
/// Unplaced coordinates are written as `NaN` so numeric readers keep the
/// column type.
pub struct CsvFormat;

impl TableFormat for CsvFormat {
    fn id(&self) -> &'static str {
        "csv"
    }

    fn display_name(&self) -> &'static str {
        "CSV"
    }

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn render(&self, table: &AnnotationTable) -> Result<String> {
        let mut lines = Vec::with_capacity(table.len() + 1);
        lines.push(COLUMNS.join(","));
        for row in &table.rows {
            lines.push(format!(
                "{},{},{},{},{}",
                row.original,
                row.mapped,
                row.slice,
                coordinate(row.x),
                coordinate(row.y)
            ));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }
}

fn coordinate(value: Option<i32>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}
