use manifest_config::FieldConfig;
use serde::Serialize;

/// Column order of the manifest. Must match the field order of [`ManifestRow`].
pub const HEADER: [&str; 11] = [
    "title",
    "source",
    "source_identifier",
    "source_metadata_identifier",
    "model",
    "purl",
    "parents",
    "series",
    "related_url",
    "file",
    "pdf_state",
];

/// Joins file names in the `file` column. Names containing it are not escaped.
pub const FILE_SEPARATOR: &str = ";";
/// Written to the `file` column when a directory's contents can't be listed.
pub const UNREADABLE_PLACEHOLDER: &str = "(Error: Could not read contents)";

/// Files found inside a single digital object directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileListing {
    Listed(Vec<String>),
    Unreadable,
}
impl FileListing {
    /// Value for the `file` column.
    pub fn render(&self) -> String {
        match self {
            Self::Listed(names) => names.join(FILE_SEPARATOR),
            Self::Unreadable => UNREADABLE_PLACEHOLDER.to_string(),
        }
    }
}

/// One digital object in the manifest.
///
/// `source`, `source_identifier` and `source_metadata_identifier` always hold
/// the same value: the object's directory name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ManifestRow {
    pub title: String,
    pub source: String,
    pub source_identifier: String,
    pub source_metadata_identifier: String,
    pub model: String,
    pub purl: String,
    pub parents: String,
    pub series: String,
    pub related_url: String,
    pub file: String,
    pub pdf_state: String,
}
impl ManifestRow {
    pub fn new(identifier: &str, title: impl Into<String>, listing: &FileListing, fields: &FieldConfig) -> Self {
        Self {
            title: title.into(),
            source: identifier.to_string(),
            source_identifier: identifier.to_string(),
            source_metadata_identifier: identifier.to_string(),
            model: fields.model.clone(),
            purl: fields.purl(identifier),
            parents: fields.parents.clone(),
            series: fields.series.clone(),
            related_url: fields.related_url.clone(),
            file: listing.render(),
            pdf_state: fields.pdf_state.clone(),
        }
    }

    /// File names recovered from the `file` column, or `None` if the directory
    /// couldn't be read.
    pub fn files(&self) -> Option<Vec<&str>> {
        match self.file.as_str() {
            UNREADABLE_PLACEHOLDER => None,
            "" => Some(Vec::new()),
            joined => Some(joined.split(FILE_SEPARATOR).collect()),
        }
    }
}
