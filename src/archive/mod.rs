//! Profile archive materialization.
//!
//! A profile can be stored as a plain directory tree, a zip archive, or a
//! tar+gzip archive. Whatever the container, materialization produces the
//! same [`ProfileArchive`]: relative paths mapped to byte content, held in
//! lexical path order. The content digest is computed over that logical
//! listing, never over raw container bytes, so the same tree hashes the
//! same whether it arrives as a directory, a zip, or a tgz.
//!
//! Materialization is the only I/O-bound step of a profile check; it can be
//! cancelled between entries with a caller-supplied [`CancelToken`].

mod dir;
mod tgz;
mod zip;

use crate::error::{CairnError, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Cooperative cancellation for archive materialization.
///
/// Clone the token, hand one copy to the loader, and call [`cancel`] from
/// another thread (or a timeout) to abort the read between entries.
///
/// [`cancel`]: CancelToken::cancel
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CairnError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Detected container kind of a profile path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Directory,
    Zip,
    TarGz,
}

/// A profile materialized to a uniform file listing.
///
/// Paths are relative, `/`-separated, and iterate in lexical order, which
/// makes the digest reproducible across equivalent container formats.
#[derive(Debug, Clone)]
pub struct ProfileArchive {
    files: BTreeMap<String, Vec<u8>>,
    location: PathBuf,
    kind: ContainerKind,
}

impl ProfileArchive {
    /// Materialize the profile at `path`, sniffing the container kind.
    pub fn materialize(path: &Path) -> Result<Self> {
        Self::materialize_with(path, &CancelToken::new())
    }

    /// Materialize with a cancellation token, checked between entries.
    pub fn materialize_with(path: &Path, cancel: &CancelToken) -> Result<Self> {
        let kind = sniff(path)?;
        debug!("Materializing {:?} profile from {}", kind, path.display());
        let files = match kind {
            ContainerKind::Directory => dir::read(path, cancel)?,
            ContainerKind::Zip => zip::read(path, cancel)?,
            ContainerKind::TarGz => tgz::read(path, cancel)?,
        };
        Ok(Self {
            files,
            location: path.to_path_buf(),
            kind,
        })
    }

    /// The path this archive was materialized from.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The detected container kind.
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Relative paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// All entries in lexical path order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_slice()))
    }

    /// Byte content of one file, if present.
    pub fn read(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// UTF-8 content of one file, if present and valid.
    pub fn read_str(&self, path: &str) -> Option<&str> {
        self.read(path).and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Content-integrity digest: sha256 over `path NUL content NUL` for
    /// every entry in lexical path order. Container metadata never
    /// contributes, so a directory, its zip, and its tgz hash identically.
    pub fn sha256(&self) -> String {
        let mut hasher = Sha256::new();
        for (path, content) in &self.files {
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
            hasher.update(content);
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }
}

/// Detect the container kind by path shape, falling back to magic bytes.
fn sniff(path: &Path) -> Result<ContainerKind> {
    if !path.exists() {
        return Err(CairnError::ProfileNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        return Ok(ContainerKind::Directory);
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.ends_with(".zip") {
        return Ok(ContainerKind::Zip);
    }
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        return Ok(ContainerKind::TarGz);
    }

    let mut magic = [0u8; 4];
    let mut file = File::open(path)?;
    let read = file.read(&mut magic)?;
    if read >= 4 && magic == [0x50, 0x4b, 0x03, 0x04] {
        return Ok(ContainerKind::Zip);
    }
    if read >= 2 && magic[..2] == [0x1f, 0x8b] {
        return Ok(ContainerKind::TarGz);
    }

    Err(CairnError::UnsupportedArchive {
        path: path.to_path_buf(),
    })
}

/// Normalize an entry path to the canonical relative form.
///
/// Forward slashes, no leading `./`, no empty components. Entries with
/// parent-directory components are rejected outright; nothing outside the
/// logical tree may enter the listing.
pub(crate) fn normalize_entry_path(raw: &str) -> Option<String> {
    let raw = raw.replace('\\', "/");
    let mut parts = Vec::new();
    for part in raw.split('/') {
        match part {
            "" | "." => continue,
            ".." => return None,
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
