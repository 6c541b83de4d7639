//! Profile loading and top-level operations.
//!
//! A [`Profile`] ties together the materialized archive, its finalized
//! metadata, and the location it came from. It owns the operations callers
//! reach for: content digest, platform/runtime applicability, and the full
//! diagnostic check.
//!
//! # Example
//!
//! ```no_run
//! use cairn::profile::Profile;
//! use cairn::platform::PlatformFacts;
//! use std::path::Path;
//!
//! let profile = Profile::load(Path::new("./my-profile"))?;
//! let facts = PlatformFacts::new("ubuntu", "debian", "14.04");
//! if profile.supports_platform(&facts) {
//!     let report = profile.check();
//!     println!("valid: {}", report.valid);
//! }
//! # Ok::<(), cairn::CairnError>(())
//! ```

use crate::archive::{CancelToken, ProfileArchive};
use crate::check::{CheckReport, ProfileChecker};
use crate::error::{CairnError, Result};
use crate::metadata::{FinalizeOptions, Metadata, SourceFormat, DECLARATIVE_FILE, LEGACY_FILE};
use crate::platform::{self, PlatformFacts};
use std::path::Path;

/// Options for [`Profile::load_with_options`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit profile id; overwrites any name declared in the metadata.
    pub profile_id: Option<String>,
    /// Cancellation token for the materialization step.
    pub cancel: Option<CancelToken>,
}

/// A loaded profile: archive, finalized metadata, location.
#[derive(Debug, Clone)]
pub struct Profile {
    archive: ProfileArchive,
    metadata: Metadata,
    location: String,
}

impl Profile {
    /// Load a profile from a directory, zip, or tar+gzip path.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_options(path, &LoadOptions::default())
    }

    /// Load with an explicit profile id and/or cancellation token.
    ///
    /// Materialization failures and an absent or unparseable metadata
    /// document are fatal; everything downstream is collected diagnostics.
    pub fn load_with_options(path: &Path, options: &LoadOptions) -> Result<Self> {
        let cancel = options.cancel.clone().unwrap_or_default();
        let archive = ProfileArchive::materialize_with(path, &cancel)?;
        let location = path.display().to_string();

        let (format, content) = metadata_document(&archive).ok_or_else(|| {
            CairnError::MetadataNotFound {
                path: path.to_path_buf(),
            }
        })?;
        let mut metadata = Metadata::from_source(content, format)?;
        metadata.finalize(
            options.profile_id.as_deref(),
            &FinalizeOptions {
                target: Some(location.clone()),
            },
        );

        Ok(Self {
            archive,
            metadata,
            location,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn archive(&self) -> &ProfileArchive {
        &self.archive
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// The profile's display name: finalized name, else title, else the
    /// load location.
    pub fn name(&self) -> &str {
        self.metadata
            .name
            .as_deref()
            .or(self.metadata.title.as_deref())
            .unwrap_or(&self.location)
    }

    /// Format-independent content digest of the profile tree.
    pub fn sha256(&self) -> String {
        self.archive.sha256()
    }

    /// Whether this profile declares support for the given target.
    pub fn supports_platform(&self, facts: &PlatformFacts) -> bool {
        platform::supports_platform(&self.metadata.supports, facts, crate::VERSION)
    }

    /// Whether this profile's runtime constraints accept the running engine.
    pub fn supports_runtime(&self) -> bool {
        platform::supports_runtime(&self.metadata.supports, crate::VERSION)
    }

    /// Run the full diagnostic check and return the structured report.
    pub fn check(&self) -> CheckReport {
        ProfileChecker::new(self).run()
    }
}

/// Locate the metadata document, preferring the declarative form.
fn metadata_document(archive: &ProfileArchive) -> Option<(SourceFormat, &str)> {
    if let Some(content) = archive.read_str(DECLARATIVE_FILE) {
        return Some((SourceFormat::Declarative, content));
    }
    if let Some(content) = archive.read_str(LEGACY_FILE) {
        return Some((SourceFormat::Legacy, content));
    }
    None
}
