// src/headers.rs

//! Header accumulation and the final header query

use crate::clause::MarkerError;
use crate::config::BuildConfig;
use std::collections::{BTreeMap, BTreeSet};

/// Generated header values, per header name
///
/// Values are kept sorted and deduplicated. Only values that already went
/// through macro expansion are added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    headers: BTreeMap<String, BTreeSet<String>>,
}

impl HeaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, header: &str, value: String) {
        self.headers.entry(header.to_string()).or_default().insert(value);
    }

    pub fn values(&self, header: &str) -> Option<&BTreeSet<String>> {
        self.headers.get(header)
    }

    /// Names of headers that received at least one value
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Sorted, comma joined generated values
    pub fn joined(&self, header: &str) -> Option<String> {
        self.headers
            .get(header)
            .map(|values| values.iter().map(String::as_str).collect::<Vec<_>>().join(","))
    }

    /// Merge generated values after a pre-existing header value
    pub fn merged(&self, header: &str, existing: Option<&str>) -> Option<String> {
        match (existing, self.joined(header)) {
            (Some(existing), Some(generated)) => Some(format!("{},{}", existing, generated)),
            (None, Some(generated)) => Some(generated),
            (existing, None) => existing.map(str::to_string),
        }
    }
}

/// A marker that could not be translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Type the marker was attached to
    pub type_name: String,
    /// Marker as written at the use site
    pub marker: String,
    pub error: MarkerError,
}

/// Result of one header pass
#[derive(Debug, Clone)]
pub struct Analysis {
    table: HeaderTable,
    properties: BTreeMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub(crate) fn new(
        table: HeaderTable,
        config: &BuildConfig,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            table,
            properties: config.properties.clone(),
            diagnostics,
        }
    }

    /// Value of a header for the manifest
    ///
    /// The build's own value for the header comes first, followed by the
    /// generated values. Without generated values the build's value is
    /// returned unchanged, possibly `None`.
    pub fn header(&self, name: &str) -> Option<String> {
        let existing = self.properties.get(name).map(String::as_str);
        self.table.merged(name, existing)
    }

    pub fn table(&self) -> &HeaderTable {
        &self.table
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_and_sort() {
        let mut table = HeaderTable::new();
        table.add("Bundle-Category", "web".to_string());
        table.add("Bundle-Category", "osgi".to_string());
        table.add("Bundle-Category", "web".to_string());
        assert_eq!(table.joined("Bundle-Category").as_deref(), Some("osgi,web"));
        assert_eq!(table.values("Bundle-Category").unwrap().len(), 2);
    }

    #[test]
    fn test_merged_with_existing() {
        let mut table = HeaderTable::new();
        table.add("H", "b".to_string());
        table.add("H", "a".to_string());
        assert_eq!(table.merged("H", Some("z")).as_deref(), Some("z,a,b"));
        assert_eq!(table.merged("H", None).as_deref(), Some("a,b"));
    }

    #[test]
    fn test_merged_without_generated() {
        let table = HeaderTable::new();
        assert_eq!(table.merged("H", Some("raw")).as_deref(), Some("raw"));
        assert_eq!(table.merged("H", None), None);
    }

    #[test]
    fn test_analysis_header_is_idempotent() {
        let mut table = HeaderTable::new();
        table.add("Bundle-License", "MIT".to_string());
        let mut config = BuildConfig::default();
        config
            .properties
            .insert("Bundle-License".to_string(), "EPL-1.0".to_string());
        config
            .properties
            .insert("Bundle-Vendor".to_string(), "ACME".to_string());
        let analysis = Analysis::new(table, &config, Vec::new());

        let first = analysis.header("Bundle-License");
        assert_eq!(first.as_deref(), Some("EPL-1.0,MIT"));
        assert_eq!(analysis.header("Bundle-License"), first);
        assert_eq!(analysis.header("Bundle-Vendor").as_deref(), Some("ACME"));
        assert_eq!(analysis.header("Bundle-DocURL"), None);
    }
}
