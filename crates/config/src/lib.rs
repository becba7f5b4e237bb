//! Layered configuration for manifest generation.
//!
//! Every value has a compiled-in default, so running with no configuration at
//! all produces the standard African Studies ingest manifest. Sources are
//! merged with [figment] in the following order (later wins):
//!
//! 1. Compiled-in defaults ([`ManifestConfig::default`]),
//! 2. The user's configuration file (`config.toml` in the platform config
//!    directory, see [`user_config_path`]),
//! 3. `manifest.toml` in the working directory,
//! 4. A file named on the command-line,
//! 5. Environment variables prefixed with `INGEST_MANIFEST_` (nested keys are
//!    separated by `__`, e.g. `INGEST_MANIFEST_FIELDS__MODEL`),
//! 6. Command-line overrides ([`ConfigOverrides`]).

pub mod error;
mod fields;

pub use crate::fields::FieldConfig;

use crate::error::{ErrorKind, Result};
use derive_more::Display;
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_METADATA_FILENAME: &str = "metadata.csv";
pub const DEFAULT_OUTPUT_FILENAME: &str = "digital_object_ingest_manifest.csv";
/// Name of the per-directory configuration file picked up automatically.
pub const LOCAL_CONFIG_FILENAME: &str = "manifest.toml";
pub const ENV_PREFIX: &str = "INGEST_MANIFEST_";

/// Order in which digital objects (and the files inside them) are emitted.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Sorted by directory name (and file name within each directory), so the
    /// same tree always produces the same manifest.
    #[default]
    #[display("identifier")]
    Identifier,
    /// Whatever order the platform's directory iteration returns. Not stable
    /// across platforms or filesystems.
    #[display("filesystem")]
    Filesystem,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Metadata lookup file. Relative paths resolve against the working directory.
    pub metadata: PathBuf,
    /// Manifest output file. Relative paths resolve against the working directory.
    pub output: PathBuf,
    pub ordering: Ordering,
    pub fields: FieldConfig,
}
impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            metadata: PathBuf::from(DEFAULT_METADATA_FILENAME),
            output: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            ordering: Ordering::default(),
            fields: FieldConfig::default(),
        }
    }
}
impl ManifestConfig {
    pub fn metadata_path(&self, working_dir: impl AsRef<Path>) -> PathBuf {
        resolve(working_dir.as_ref(), &self.metadata)
    }

    pub fn output_path(&self, working_dir: impl AsRef<Path>) -> PathBuf {
        resolve(working_dir.as_ref(), &self.output)
    }
}

fn resolve(working_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { working_dir.join(path) }
}

/// Values supplied on the command-line. Anything left as `None` falls through
/// to the lower-priority sources.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
}

/// Location of the per-user configuration file, if the platform has a notion
/// of one.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("edu", "Indiana University", "ingest-manifest").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Builder that accumulates configuration sources in priority order.
pub struct ConfigLoader {
    figment: Figment,
}
impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
impl ConfigLoader {
    /// Starts from the compiled-in defaults only.
    pub fn new() -> Self {
        Self { figment: Figment::from(Serialized::defaults(ManifestConfig::default())) }
    }

    /// Layers the standard sources: user config, `manifest.toml` in the
    /// working directory, then the environment.
    pub fn standard(working_dir: impl AsRef<Path>) -> Self {
        let loader = Self::new();
        let loader = match user_config_path() {
            Some(path) => loader.with_optional_file(path),
            None => loader,
        };
        loader.with_optional_file(working_dir.as_ref().join(LOCAL_CONFIG_FILENAME))
    }

    /// Merges a TOML file if it exists; silently skipped otherwise.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Merging configuration file");
        } else {
            tracing::trace!(path = %path.display(), "Configuration file not present; skipping");
        }
        Self { figment: self.figment.merge(Toml::file(path)) }
    }

    /// Merges a TOML file that the user explicitly asked for, so it must exist.
    pub fn with_required_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        Ok(self.with_optional_file(path))
    }

    pub fn with_env(self) -> Self {
        Self { figment: self.figment.merge(Env::prefixed(ENV_PREFIX).split("__")) }
    }

    pub fn with_overrides(self, overrides: &ConfigOverrides) -> Self {
        Self { figment: self.figment.merge(Serialized::defaults(overrides)) }
    }

    pub fn load(self) -> Result<ManifestConfig> {
        let config: ManifestConfig = self.figment.extract().or_raise(|| ErrorKind::Invalid)?;
        tracing::debug!(
            metadata = %config.metadata.display(),
            output = %config.output.display(),
            ordering = %config.ordering,
            "Configuration loaded"
        );
        Ok(config)
    }
}
