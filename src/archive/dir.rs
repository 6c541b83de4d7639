//! Directory tree materialization.

use super::{normalize_entry_path, CancelToken};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Read every regular file under `root` into the uniform listing.
///
/// Paths are recorded relative to `root`. Symlinks are not followed, so a
/// link pointing outside the profile cannot smuggle content in.
pub(super) fn read(root: &Path, cancel: &CancelToken) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        cancel.check()?;
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => crate::error::CairnError::Io(io),
            None => crate::error::CairnError::ArchiveReadError {
                path: root.to_path_buf(),
                message: "unreadable directory entry".to_string(),
            },
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        let Some(normalized) = normalize_entry_path(&relative) else {
            continue;
        };
        files.insert(normalized, fs::read(entry.path())?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_nested_files_relative_to_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("top.yml"), "x").unwrap();
        fs::write(temp.path().join("a/b/deep.yml"), "y").unwrap();

        let files = read(temp.path(), &CancelToken::new()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains_key("top.yml"));
        assert!(files.contains_key("a/b/deep.yml"));
    }

    #[test]
    fn skips_directories_themselves() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("empty-dir")).unwrap();

        let files = read(temp.path(), &CancelToken::new()).unwrap();
        assert!(files.is_empty());
    }
}
