use crate::error::{ErrorKind, Result};
use crate::{MetadataIndex, MetadataRecord};
use exn::ResultExt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::instrument;

pub const IDENTIFIER_COLUMN: &str = "source_metadata_identifier";
pub const TITLE_COLUMN: &str = "title";

fn classify(err: &csv::Error) -> ErrorKind {
    if err.is_io_error() { ErrorKind::Unreadable } else { ErrorKind::Malformed }
}

/// Position of the named column. When a header is repeated the last one wins,
/// the same as reading each row into a map keyed by header.
fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.trim_start_matches('\u{feff}') == name)
        .map(|(i, _)| i)
        .last()
}

impl MetadataIndex {
    /// Loads the index from a metadata CSV, degrading to an empty index on any
    /// failure.
    ///
    /// A missing metadata file is expected when a batch has no titles yet, so
    /// it's logged as a warning and the manifest is built with blank titles.
    /// Read and parse failures are handled the same way (with the error detail
    /// attached to the warning). A file that fails part-way through never
    /// produces a partial index.
    pub fn build(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_build(path) {
            Ok(index) => index,
            Err(err) => {
                match &*err {
                    ErrorKind::NotFound(_) => {
                        tracing::warn!(path = %path.display(), "Metadata file not found; titles will be blank");
                    },
                    _ => {
                        tracing::warn!(path = %path.display(), error = ?err, "Could not read metadata file; titles will be blank");
                    },
                }
                Self::new()
            },
        }
    }

    /// Loads the index from a metadata CSV, reporting why it couldn't.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn try_build(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Err(e) => return Err(e).or_raise(|| ErrorKind::Unreadable),
        };
        let index = Self::from_reader(file)?;
        tracing::info!(entries = index.len(), "Successfully loaded {} entries from metadata file", index.len());
        Ok(index)
    }

    /// Parses metadata CSV (with a header row) from any reader.
    ///
    /// Only the `source_metadata_identifier` and `title` columns are read; any
    /// others are ignored. Rows without an identifier (column missing, row too
    /// short, or value blank) are skipped. A missing or blank title is stored
    /// as an empty string. Values are taken verbatim; nothing is trimmed.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => {
                let kind = classify(&e);
                return Err(e).or_raise(|| kind);
            },
        };
        let identifier_column = column(&headers, IDENTIFIER_COLUMN);
        let title_column = column(&headers, TITLE_COLUMN);
        if identifier_column.is_none() {
            tracing::warn!(column = IDENTIFIER_COLUMN, "Metadata file has no identifier column; no titles can be matched");
        }

        let mut index = Self::new();
        for (position, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    let kind = classify(&e);
                    return Err(e).or_raise(|| kind);
                },
            };
            let Some(identifier) = identifier_column.and_then(|i| record.get(i)).filter(|id| !id.is_empty()) else {
                tracing::trace!(row = position + 1, "Metadata row has no identifier; skipping");
                continue;
            };
            let title = title_column.and_then(|i| record.get(i)).unwrap_or_default();
            if let Some(previous) = index.insert(MetadataRecord::new(identifier, title)) {
                tracing::debug!(identifier = %previous.identifier, "Duplicate identifier in metadata; later row wins");
            }
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case::basic("source_metadata_identifier,title\nA1,Letter One\nB2,Letter Two\n", &[("A1", "Letter One"), ("B2", "Letter Two")])]
    #[case::extra_columns("date,title,source_metadata_identifier,notes\n1962,Letter One,A1,x\n", &[("A1", "Letter One")])]
    #[case::blank_title("source_metadata_identifier,title\nA1,\n", &[("A1", "")])]
    #[case::missing_title_column("source_metadata_identifier,date\nA1,1962\n", &[("A1", "")])]
    #[case::short_row("source_metadata_identifier,date,title\nA1\nB2,1962,Two\n", &[("A1", ""), ("B2", "Two")])]
    #[case::long_row("source_metadata_identifier,title\nA1,One,extra,columns\n", &[("A1", "One")])]
    #[case::byte_order_mark("\u{feff}source_metadata_identifier,title\nA1,One\n", &[("A1", "One")])]
    #[case::repeated_header("source_metadata_identifier,title,title\nA1,First,Second\n", &[("A1", "Second")])]
    #[case::blank_identifier("source_metadata_identifier,title\n,Orphan\nA1,One\n", &[("A1", "One")])]
    #[case::missing_identifier_column("id,title\nA1,One\n", &[])]
    #[case::duplicates("source_metadata_identifier,title\nA1,First\nA1,Second\nA1,Third\n", &[("A1", "Third")])]
    #[case::quoted("source_metadata_identifier,title\nA1,\"Letters, \"\"Collected\"\"\"\n", &[("A1", "Letters, \"Collected\"")])]
    #[case::not_trimmed("source_metadata_identifier,title\n A1 , One \n", &[(" A1 ", " One ")])]
    #[case::header_only("source_metadata_identifier,title\n", &[])]
    #[case::empty_file("", &[])]
    fn test_from_reader(#[case] csv: &str, #[case] expected: &[(&str, &str)]) {
        let index = MetadataIndex::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(index.len(), expected.len());
        for (identifier, title) in expected {
            assert_eq!(index.get(identifier).map(|r| r.title.as_str()), Some(*title));
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let bytes = b"source_metadata_identifier,title\nA1,One\nB2,\xff\xfe\n";
        let err = MetadataIndex::from_reader(&bytes[..]).unwrap_err();
        assert_eq!(*err, ErrorKind::Malformed);
    }

    #[test]
    fn test_build_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("metadata.csv");
        fs::write(&path, "source_metadata_identifier,title\nA1,Letter One\n").unwrap();
        let index = MetadataIndex::build(&path);
        assert_eq!(index.len(), 1);
        assert_eq!(index.title("A1"), "Letter One");
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("metadata.csv");
        let err = MetadataIndex::try_build(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path.clone()));
        assert!(MetadataIndex::build(&path).is_empty());
    }

    #[test]
    fn test_directory_is_unreadable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = MetadataIndex::try_build(temp_dir.path()).unwrap_err();
        assert_eq!(*err, ErrorKind::Unreadable);
        assert!(MetadataIndex::build(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_partial_failure_yields_no_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("metadata.csv");
        fs::write(&path, b"source_metadata_identifier,title\nA1,One\nB2,\xff\n").unwrap();
        assert!(MetadataIndex::build(&path).is_empty());
    }
}
