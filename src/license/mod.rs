//! License identifier validation.
//!
//! Profiles may declare a `license` field in their metadata. A declared
//! license is checked against the SPDX identifier registry; anything else is
//! flagged as non-standard, which degrades the check to a warning but never
//! blocks validity. An absent license is not a defect at this layer (the
//! checker decides whether to warn about the missing field).
//!
//! # Example
//!
//! ```
//! use cairn::license::{classify, LicenseClass};
//!
//! assert_eq!(classify(Some("Apache-2.0")), LicenseClass::Standard);
//! assert_eq!(classify(Some("Proprietary")), LicenseClass::Standard);
//! assert_eq!(classify(Some("My Custom License")), LicenseClass::NonStandard);
//! assert_eq!(classify(None), LicenseClass::Absent);
//! ```

pub mod spdx;

use std::collections::HashSet;
use std::sync::LazyLock;

pub use spdx::SPDX_IDENTIFIERS;

/// Non-SPDX identifier accepted for commercial profile content.
const PROPRIETARY: &str = "Proprietary";

/// Process-wide identifier set, built once from the embedded table.
static SPDX_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SPDX_IDENTIFIERS.iter().copied().collect());

/// Classification of a profile's declared license.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseClass {
    /// Exact SPDX identifier, or the literal `Proprietary`.
    Standard,
    /// Declared but not a recognized identifier; warn, never error.
    NonStandard,
    /// No license declared.
    Absent,
}

/// Classify a declared license against the SPDX registry.
///
/// Matching is exact and case-sensitive: `"apache-2.0"` is non-standard.
pub fn classify(license: Option<&str>) -> LicenseClass {
    match license {
        None => LicenseClass::Absent,
        Some(id) if id == PROPRIETARY || SPDX_SET.contains(id) => LicenseClass::Standard,
        Some(_) => LicenseClass::NonStandard,
    }
}
