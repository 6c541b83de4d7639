//! Zip archive materialization.

use super::{normalize_entry_path, CancelToken};
use crate::error::{CairnError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read every file entry of a zip archive into the uniform listing.
///
/// Directory entries are skipped; entry names are normalized so the listing
/// matches what the same tree yields when read from disk.
pub(super) fn read(path: &Path, cancel: &CancelToken) -> Result<BTreeMap<String, Vec<u8>>> {
    let file = File::open(path)?;
    let mut archive =
        ::zip::read::ZipArchive::new(file).map_err(|e| CairnError::ArchiveReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut files = BTreeMap::new();
    for index in 0..archive.len() {
        cancel.check()?;
        let mut entry = archive
            .by_index(index)
            .map_err(|e| CairnError::ArchiveReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if entry.is_dir() {
            continue;
        }
        let Some(normalized) = normalize_entry_path(entry.name()) else {
            continue;
        };
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut content)?;
        files.insert(normalized, content);
    }
    Ok(files)
}
