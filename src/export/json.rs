//! JSON table format.

use crate::error::Result;
use crate::export::table::AnnotationTable;
use crate::export::traits::TableFormat;

/// Pretty-printed array of row objects keyed by column name.
pub struct JsonFormat;

impl TableFormat for JsonFormat {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn render(&self, table: &AnnotationTable) -> Result<String> {
        Ok(serde_json::to_string_pretty(table)?)
    }
}
