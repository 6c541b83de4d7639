//! Profile metadata loading, defaulting, and finalization.
//!
//! Metadata flows through two steps: a pure parse ([`Metadata::from_source`])
//! that turns document content into a typed object, and an idempotent
//! defaulting pass ([`Metadata::finalize`]) that derives the profile name
//! from the profile id or from a sanitized target path.
//!
//! # Example
//!
//! ```
//! use cairn::metadata::{FinalizeOptions, Metadata, SourceFormat};
//!
//! let mut meta = Metadata::from_source("version: '1.0.0'", SourceFormat::Declarative).unwrap();
//! meta.finalize(Some("my-profile"), &FinalizeOptions::default());
//! assert_eq!(meta.name.as_deref(), Some("my-profile"));
//! ```

pub mod source;
pub mod support;

use crate::error::Result;
use serde_yaml::Value;
use tracing::warn;

pub use source::{SourceFormat, DECLARATIVE_FILE, LEGACY_FILE};
pub use support::{normalize, SupportSet};

/// Options for [`Metadata::finalize`].
#[derive(Debug, Clone, Default)]
pub struct FinalizeOptions {
    /// The path the profile was loaded from; used as the name fallback
    /// when neither a profile id nor a title is available.
    pub target: Option<String>,
}

/// Finalized profile metadata.
///
/// String fields keep their runtime type from the source document; the
/// struct fields are the canonical access discipline (internal identifiers,
/// not arbitrary source-document strings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Profile name; populated during finalization unless only a title
    /// was given.
    pub name: Option<String>,
    pub title: Option<String>,
    /// SemVer-shaped version string; validity is the checker's concern.
    pub version: Option<String>,
    pub summary: Option<String>,
    pub maintainer: Option<String>,
    pub copyright: Option<String>,
    pub license: Option<String>,
    pub author: Option<String>,
    /// Canonical support constraint sets.
    pub supports: Vec<SupportSet>,
    /// Which document form produced this metadata.
    pub source: SourceFormat,
}

impl Metadata {
    /// Parse raw document content into metadata.
    ///
    /// The supports clause is normalized on the way in; a legacy
    /// scalar/array clause logs its deprecation warning here, once.
    pub fn from_source(content: &str, format: SourceFormat) -> Result<Self> {
        let params = format.parse(content)?;

        let (supports, deprecation) = support::normalize(params.get("supports"));
        if let Some(message) = deprecation {
            warn!("{}", message);
        }

        Ok(Self {
            name: string_field(&params, "name"),
            title: string_field(&params, "title"),
            version: string_field(&params, "version"),
            summary: string_field(&params, "summary"),
            maintainer: string_field(&params, "maintainer"),
            copyright: string_field(&params, "copyright"),
            license: string_field(&params, "license"),
            author: string_field(&params, "author"),
            supports,
            source: format,
        })
    }

    /// Apply the name-defaulting rules. Idempotent.
    ///
    /// - a given profile id always wins, overwriting a declared name
    /// - otherwise, with no name and no title, a target path becomes
    ///   `tests from <path>` with separators replaced by dots
    /// - otherwise a declared title stands alone and `name` stays absent
    pub fn finalize(&mut self, profile_id: Option<&str>, options: &FinalizeOptions) {
        match profile_id {
            Some(id) if !id.is_empty() => self.name = Some(id.to_string()),
            _ => {
                if self.name.is_none() && self.title.is_none() {
                    if let Some(target) = &options.target {
                        self.name = Some(format!("tests from {}", sanitize_target(target)));
                    }
                }
            }
        }
    }

    /// True when the metadata declares no support restriction at all.
    pub fn unrestricted(&self) -> bool {
        self.supports.is_empty()
    }
}

/// Replace path separators with dots so the derived name is a flat token.
fn sanitize_target(target: &str) -> String {
    target.replace(['/', '\\'], ".")
}

fn string_field(params: &serde_yaml::Mapping, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
