use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "ArchivalMaterial";
pub const DEFAULT_PARENTS: &str = "pz50gz79h";
pub const DEFAULT_RELATED_URL: &str = "https://purl.dlib.indiana.edu/iudl/findingaids/africanstudies/VAA9500";
pub const DEFAULT_PDF_STATE: &str = "downloadable";
pub const DEFAULT_PURL_BASE: &str = "http://purl.dlib.indiana.edu/iudl/africanstudies/";

/// Values applied uniformly to every row of the manifest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub model: String,
    pub parents: String,
    pub series: String,
    pub related_url: String,
    pub pdf_state: String,
    /// Prefix of every persistent URL; the object identifier is appended as-is.
    pub purl_base: String,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            parents: DEFAULT_PARENTS.to_string(),
            series: String::new(),
            related_url: DEFAULT_RELATED_URL.to_string(),
            pdf_state: DEFAULT_PDF_STATE.to_string(),
            purl_base: DEFAULT_PURL_BASE.to_string(),
        }
    }
}
impl FieldConfig {
    pub fn purl(&self, identifier: &str) -> String {
        format!("{}{}", self.purl_base, identifier)
    }
}
