use crate::error::Result;
use crate::row::{FileListing, ManifestRow};
use crate::scan::{list_files, object_directories};
use crate::write::write_manifest;
use derive_more::Display;
use manifest_config::{FieldConfig, ManifestConfig, Ordering};
use manifest_metadata::MetadataIndex;
use std::path::Path;
use tracing::instrument;

/// Counts gathered while building, for the end-of-run summary.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[display("{rows} rows ({matched} with metadata, {unmatched} without, {unreadable} unreadable)")]
pub struct ManifestStats {
    pub rows: usize,
    /// Rows whose identifier had an entry in the metadata index.
    pub matched: usize,
    pub unmatched: usize,
    /// Rows whose directory contents couldn't be listed.
    pub unreadable: usize,
}

#[derive(Debug)]
pub struct Manifest {
    pub rows: Vec<ManifestRow>,
    pub stats: ManifestStats,
}
impl Manifest {
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_manifest(&self.rows, path)
    }
}

/// Turns the subdirectories of a working directory into manifest rows.
pub struct ManifestBuilder<'a> {
    fields: &'a FieldConfig,
    ordering: Ordering,
}
impl<'a> ManifestBuilder<'a> {
    pub fn new(config: &'a ManifestConfig) -> Self {
        Self { fields: &config.fields, ordering: config.ordering }
    }

    /// Builds one row per immediate subdirectory of `working_dir`.
    ///
    /// Only fails if `working_dir` itself can't be read. A subdirectory whose
    /// contents can't be listed still gets a row, with a placeholder in place
    /// of its file list.
    #[instrument(skip_all, fields(working_dir = %working_dir.as_ref().display(), ordering = %self.ordering))]
    pub fn build(&self, working_dir: impl AsRef<Path>, index: &MetadataIndex) -> Result<Manifest> {
        let objects = object_directories(working_dir.as_ref(), self.ordering)?;
        tracing::info!(count = objects.len(), "Found {} digital object directories", objects.len());

        let mut stats = ManifestStats::default();
        let mut rows = Vec::with_capacity(objects.len());
        for object in objects {
            let listing = match list_files(&object.path, self.ordering) {
                Ok(names) => FileListing::Listed(names),
                Err(err) => {
                    tracing::warn!(identifier = %object.identifier, error = ?err, "Could not read directory contents");
                    stats.unreadable += 1;
                    FileListing::Unreadable
                },
            };
            match index.get(&object.identifier) {
                Some(_) => stats.matched += 1,
                None => {
                    tracing::debug!(identifier = %object.identifier, "No metadata for directory; title left blank");
                    stats.unmatched += 1;
                },
            }
            rows.push(self.row(&object.identifier, index, &listing));
        }
        stats.rows = rows.len();
        Ok(Manifest { rows, stats })
    }

    pub fn row(&self, identifier: &str, index: &MetadataIndex, listing: &FileListing) -> ManifestRow {
        ManifestRow::new(identifier, index.title(identifier), listing, self.fields)
    }
}
