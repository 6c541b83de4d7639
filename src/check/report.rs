//! Check report structure.

use serde::Serialize;

/// The structured result of one profile check.
///
/// This is the stable contract with downstream renderers (CLI text, JSON).
/// A report is assembled once per check invocation and never mutated after
/// being handed back: errors block validity, warnings do not, and info
/// notices are logged rather than reported.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// True iff no errors were collected.
    pub valid: bool,
    /// Where the profile was loaded from.
    pub location: String,
    /// The finalized profile name (or title when no name was derived).
    pub profile_id: String,
    /// Number of controls discovered in the profile.
    pub control_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}
