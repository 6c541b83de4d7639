//! Tar+gzip archive materialization.

use super::{normalize_entry_path, CancelToken};
use crate::error::{CairnError, Result};
use flate2::read::GzDecoder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read every file entry of a tar+gzip archive into the uniform listing.
///
/// Non-file entries (directories, links) are skipped; a truncated or
/// corrupt stream surfaces as a single fatal read error.
pub(super) fn read(path: &Path, cancel: &CancelToken) -> Result<BTreeMap<String, Vec<u8>>> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);

    let mut files = BTreeMap::new();
    let entries = archive.entries().map_err(|e| CairnError::ArchiveReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    for entry in entries {
        cancel.check()?;
        let mut entry = entry.map_err(|e| CairnError::ArchiveReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .map_err(|e| CairnError::ArchiveReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .to_string_lossy()
            .into_owned();
        let Some(normalized) = normalize_entry_path(&name) else {
            continue;
        };
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| CairnError::ArchiveReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        files.insert(normalized, content);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    fn write_tgz(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn reads_entries_with_normalized_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("profile.tar.gz");
        write_tgz(
            &path,
            &[("cairn.yml", "name: t"), ("controls/a.yml", "- id: x")],
        );

        let files = read(&path, &CancelToken::new()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains_key("cairn.yml"));
        assert!(files.contains_key("controls/a.yml"));
    }

    #[test]
    fn corrupt_stream_is_an_archive_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.tgz");
        std::fs::write(&path, [0x1f, 0x8b, 0xff, 0x00, 0x01]).unwrap();

        let result = read(&path, &CancelToken::new());
        assert!(result.is_err());
    }
}
