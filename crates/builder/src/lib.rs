//! Digital object ingest manifests.
//!
//! Every immediate subdirectory of a working directory is one digital object,
//! identified by its directory name. [`ManifestBuilder`] turns each of them
//! into a [`ManifestRow`] by looking the identifier up in a
//! [`MetadataIndex`](manifest_metadata::MetadataIndex) for its title and
//! listing the files directly inside it. The rows are then written out as CSV
//! with [`write_manifest`] (or [`Manifest::write`]).
//!
//! # Example
//!
//! ```no_run
//! use manifest_builder::ManifestBuilder;
//! use manifest_config::ManifestConfig;
//! use manifest_metadata::MetadataIndex;
//!
//! # fn main() -> manifest_builder::error::Result<()> {
//! let working_dir = std::path::PathBuf::from("/path/to/objects");
//! let config = ManifestConfig::default();
//! let index = MetadataIndex::build(config.metadata_path(&working_dir));
//! let manifest = ManifestBuilder::new(&config).build(&working_dir, &index)?;
//! manifest.write(config.output_path(&working_dir))?;
//! # Ok(())
//! # }
//! ```

mod build;
pub mod error;
mod row;
mod scan;
mod write;

pub use crate::build::{Manifest, ManifestBuilder, ManifestStats};
pub use crate::row::{FILE_SEPARATOR, FileListing, HEADER, ManifestRow, UNREADABLE_PLACEHOLDER};
pub use crate::write::write_manifest;
