//! Single-level directory walking.
//!
//! Symlinks are followed, so a link to a directory counts as a digital object
//! and a link to a file counts as one of its files. Entries whose metadata
//! can't be read (most likely broken symlinks) are dropped silently, as are
//! sockets, FIFOs and other special files.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use manifest_config::Ordering;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

/// A subdirectory of the working directory; one row in the manifest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ObjectDir {
    /// The directory name, converted lossily if it isn't valid UTF-8.
    pub identifier: String,
    pub path: PathBuf,
}

enum WalkEntry {
    Directory(ObjectDir),
    File(String),
    Skip,
}

fn classify(entry: DirEntry) -> WalkEntry {
    let path = entry.path();
    let name = entry.file_name().to_string_lossy().into_owned();
    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_dir() => WalkEntry::Directory(ObjectDir { identifier: name, path }),
        Ok(metadata) if metadata.is_file() => WalkEntry::File(name),
        Ok(_) => WalkEntry::Skip,
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "Could not inspect directory entry; skipping");
            WalkEntry::Skip
        },
    }
}

/// Immediate subdirectories of `working_dir`.
pub(crate) fn object_directories(working_dir: &Path, ordering: Ordering) -> Result<Vec<ObjectDir>> {
    let error = || ErrorKind::WorkingDirectory(working_dir.to_path_buf());
    let mut objects = Vec::new();
    for entry in fs::read_dir(working_dir).or_raise(error)? {
        if let WalkEntry::Directory(object) = classify(entry.or_raise(error)?) {
            objects.push(object);
        }
    }
    if ordering == Ordering::Identifier {
        objects.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    }
    Ok(objects)
}

/// Names of the immediate files inside `dir`. Subdirectories are not listed
/// (and not descended into).
pub(crate) fn list_files(dir: &Path, ordering: Ordering) -> Result<Vec<String>> {
    let error = || ErrorKind::Listing(dir.to_path_buf());
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).or_raise(error)? {
        if let WalkEntry::File(name) = classify(entry.or_raise(error)?) {
            names.push(name);
        }
    }
    if ordering == Ordering::Identifier {
        names.sort();
    }
    Ok(names)
}
