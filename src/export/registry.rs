//! Format registry for discovering and accessing table formats.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{LocalizerError, Result};
use crate::export::csv::CsvFormat;
use crate::export::json::JsonFormat;
use crate::export::traits::TableFormat;

/// Registry of available table formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn TableFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(CsvFormat));
        registry.register(Box::new(JsonFormat));

        registry
    }

    /// Register a format implementation.
    pub fn register(&mut self, format: Box<dyn TableFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn TableFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Find the format for a file extension (case-insensitive).
    pub fn by_extension(&self, ext: &str) -> Option<&dyn TableFormat> {
        self.formats
            .values()
            .find(|f| f.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(|f| f.as_ref())
    }

    /// Pick the format for an output path from its extension.
    pub fn for_path(&self, path: &Path) -> Result<&dyn TableFormat> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.by_extension(ext)
            .ok_or_else(|| LocalizerError::UnknownFormat(path.display().to_string()))
    }

    /// Get all registered formats.
    pub fn all(&self) -> Vec<&dyn TableFormat> {
        self.formats.values().map(|f| f.as_ref()).collect()
    }

    /// Get all format IDs.
    pub fn ids(&self) -> Vec<&'static str> {
        self.formats.keys().copied().collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();
        assert!(registry.get("csv").is_some());
        assert!(registry.get("json").is_some());
        assert!(registry.get("xlsx").is_none());
        assert_eq!(registry.all().len(), 2);
    }

    #[test]
    fn test_for_path() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.for_path(Path::new("out/table.CSV")).unwrap().id(), "csv");
        assert_eq!(registry.for_path(Path::new("table.json")).unwrap().id(), "json");
        assert!(matches!(
            registry.for_path(Path::new("table")),
            Err(LocalizerError::UnknownFormat(_))
        ));
    }
}
