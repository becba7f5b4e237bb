//! Metadata lookup for digital objects.
//!
//! A [`MetadataIndex`] maps a `source_metadata_identifier` (the name of a
//! digital object's directory) to its [`MetadataRecord`]. It is loaded once
//! from a CSV file with a header row and is read-only afterwards.
//!
//! Duplicate identifiers are resolved last-write-wins: a later row in the file
//! replaces any earlier row with the same identifier.

pub mod error;
mod load;

pub use crate::load::{IDENTIFIER_COLUMN, TITLE_COLUMN};

use std::collections::HashMap;
use std::collections::hash_map::Values;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataRecord {
    pub identifier: String,
    /// May be empty.
    pub title: String,
}
impl MetadataRecord {
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), title: title.into() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MetadataIndex {
    records: HashMap<String, MetadataRecord>,
}
impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, returning the one it replaced (if any).
    pub fn insert(&mut self, record: MetadataRecord) -> Option<MetadataRecord> {
        self.records.insert(record.identifier.clone(), record)
    }

    pub fn get(&self, identifier: &str) -> Option<&MetadataRecord> {
        self.records.get(identifier)
    }

    /// The title for `identifier`, or an empty string when there is no record.
    pub fn title(&self, identifier: &str) -> &str {
        self.get(identifier).map(|record| record.title.as_str()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in no particular order.
    pub fn iter(&self) -> Values<'_, String, MetadataRecord> {
        self.records.values()
    }
}
impl Extend<MetadataRecord> for MetadataIndex {
    fn extend<T: IntoIterator<Item = MetadataRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}
impl FromIterator<MetadataRecord> for MetadataIndex {
    fn from_iter<T: IntoIterator<Item = MetadataRecord>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_defaults_to_empty() {
        let index: MetadataIndex = [MetadataRecord::new("A1", "Letter One")].into_iter().collect();
        assert_eq!(index.title("A1"), "Letter One");
        assert_eq!(index.title("B2"), "");
        assert!(index.get("B2").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut index = MetadataIndex::new();
        assert!(index.insert(MetadataRecord::new("A1", "First")).is_none());
        let replaced = index.insert(MetadataRecord::new("A1", "Second")).unwrap();
        assert_eq!(replaced.title, "First");
        assert_eq!(index.title("A1"), "Second");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty() {
        let index = MetadataIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
