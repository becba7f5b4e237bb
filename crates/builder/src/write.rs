use crate::error::{ErrorKind, Result};
use crate::row::{HEADER, ManifestRow};
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;

/// Writes the header and `rows` to `path` as CSV, replacing any existing file.
///
/// Rows are written to a temporary file next to `path` which is then renamed
/// over it, so a failure part-way through never leaves a truncated manifest
/// behind. Records are CRLF-terminated and fields are only quoted when they
/// need to be.
#[instrument(skip_all, fields(count = rows.len(), path = %path.as_ref().display()))]
pub fn write_manifest(rows: &[ManifestRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let error = || ErrorKind::OutputWrite(path.to_path_buf());
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".manifest-").suffix(".tmp");
    // Temporary files are private by default; the manifest is meant to be shared.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let temp = builder.tempfile_in(parent).or_raise(error)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(temp);
    writer.write_record(HEADER).or_raise(error)?;
    for row in rows {
        writer.serialize(row).or_raise(error)?;
    }
    let temp = writer.into_inner().map_err(|e| e.into_error()).or_raise(error)?;
    temp.as_file().sync_all().or_raise(error)?;
    temp.persist(path).map_err(|e| e.error).or_raise(error)?;
    tracing::debug!("Manifest moved into place");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::FileListing;
    use manifest_config::FieldConfig;
    use std::fs;

    fn rows() -> Vec<ManifestRow> {
        let fields = FieldConfig::default();
        vec![
            ManifestRow::new(
                "A1",
                "Letter One",
                &FileListing::Listed(vec!["scan1.tif".into(), "scan2.tif".into()]),
                &fields,
            ),
            ManifestRow::new("B2", "", &FileListing::Listed(vec![]), &fields),
        ]
    }

    #[test]
    fn test_exact_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("manifest.csv");
        write_manifest(&rows(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let expected = concat!(
            "title,source,source_identifier,source_metadata_identifier,model,purl,parents,series,related_url,file,pdf_state\r\n",
            "Letter One,A1,A1,A1,ArchivalMaterial,http://purl.dlib.indiana.edu/iudl/africanstudies/A1,pz50gz79h,,",
            "https://purl.dlib.indiana.edu/iudl/findingaids/africanstudies/VAA9500,scan1.tif;scan2.tif,downloadable\r\n",
            ",B2,B2,B2,ArchivalMaterial,http://purl.dlib.indiana.edu/iudl/africanstudies/B2,pz50gz79h,,",
            "https://purl.dlib.indiana.edu/iudl/findingaids/africanstudies/VAA9500,,downloadable\r\n",
        );
        assert_eq!(written, expected);
    }

    #[test]
    fn test_header_written_without_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("manifest.csv");
        write_manifest(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\r\n", HEADER.join(",")));
    }

    #[test]
    fn test_overwrites_and_leaves_no_temporary_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("manifest.csv");
        fs::write(&path, "stale contents that are much longer than the new manifest will be".repeat(100)).unwrap();
        write_manifest(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\r\n", HEADER.join(",")));
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_quotes_fields_when_needed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("manifest.csv");
        let row = ManifestRow::new(
            "A1",
            "Letters, \"Collected\"",
            &FileListing::Listed(vec!["a,b.tif".into()]),
            &FieldConfig::default(),
        );
        write_manifest(&[row.clone()], &path).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), 1);
        assert_eq!(&read[0][0], row.title);
        assert_eq!(&read[0][9], row.file);
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        // Can't rename a file over a directory.
        let path = temp_dir.path().join("manifest.csv");
        fs::create_dir(&path).unwrap();
        let err = write_manifest(&rows(), &path).unwrap_err();
        assert_eq!(*err, ErrorKind::OutputWrite(path.clone()));
        // The temporary file was cleaned up.
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        // Missing parent directory.
        let path = temp_dir.path().join("missing/manifest.csv");
        assert!(write_manifest(&rows(), &path).is_err());
    }
}
