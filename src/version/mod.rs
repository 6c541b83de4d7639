//! Version constraint parsing and evaluation.
//!
//! Profiles declare their own version and, optionally, a constraint on the
//! version of the engine they run under. This module evaluates those
//! constraints: an optional operator (`=`, `>=`, `>`; `=` when omitted)
//! followed by a SemVer version.
//!
//! Callers at this layer test applicability, not well-formedness, so a
//! malformed constraint or actual version answers `false` instead of raising.
//! Well-formedness of a standalone version string is a separate predicate,
//! [`is_valid_semver`], used by the metadata diagnostics.
//!
//! # Example
//!
//! ```
//! use cairn::version::{is_valid_semver, matches};
//!
//! assert!(matches(">= 1.2.0", "1.2.0"));
//! assert!(!matches("> 1.2.0", "1.2.0"));
//! assert!(matches("1.2.0", "1.2.0")); // default `=`
//!
//! assert!(is_valid_semver("1.1.0"));
//! assert!(!is_valid_semver("1.1.0.1"));
//! ```

use semver::Version;

/// Comparison operator for a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Exact match (the default when no operator is given).
    Eq,
    /// Greater than or equal.
    Ge,
    /// Strictly greater than.
    Gt,
}

/// A parsed version constraint: operator plus target version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Op,
    pub version: Version,
}

impl Constraint {
    /// Parse a constraint string like `">= 1.2.0"` or `"1.2.0"`.
    ///
    /// Returns `None` for malformed input; this layer never raises.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (op, rest) = if let Some(rest) = raw.strip_prefix(">=") {
            (Op::Ge, rest)
        } else if let Some(rest) = raw.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = raw.strip_prefix('=') {
            (Op::Eq, rest)
        } else {
            (Op::Eq, raw)
        };
        let version = Version::parse(rest.trim()).ok()?;
        Some(Self { op, version })
    }

    /// Evaluate this constraint against a concrete version.
    ///
    /// Comparison uses SemVer precedence (pre-release ordering applies,
    /// build metadata is ignored).
    pub fn matches(&self, actual: &Version) -> bool {
        match self.op {
            Op::Eq => actual == &self.version,
            Op::Ge => actual >= &self.version,
            Op::Gt => actual > &self.version,
        }
    }
}

/// Evaluate a constraint string against an actual version string.
///
/// Malformed input on either side answers `false`.
pub fn matches(constraint: &str, actual: &str) -> bool {
    let Some(constraint) = Constraint::parse(constraint) else {
        return false;
    };
    let Ok(actual) = Version::parse(actual.trim()) else {
        return false;
    };
    constraint.matches(&actual)
}

/// Check whether a string is a well-formed SemVer version.
///
/// Strict three-component form: `"1.1.0.1"` and non-numeric components are
/// rejected as `false`, never an error.
pub fn is_valid_semver(version: &str) -> bool {
    Version::parse(version.trim()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_semver_accepts_three_components() {
        assert!(is_valid_semver("1.1.0"));
        assert!(is_valid_semver("0.0.1"));
        assert!(is_valid_semver("10.20.30"));
    }

    #[test]
    fn valid_semver_accepts_prerelease() {
        assert!(is_valid_semver("1.0.0-beta.2"));
    }

    #[test]
    fn valid_semver_rejects_four_components() {
        assert!(!is_valid_semver("1.1.0.1"));
    }

    #[test]
    fn valid_semver_rejects_partial_and_non_numeric() {
        assert!(!is_valid_semver("1.1"));
        assert!(!is_valid_semver("1"));
        assert!(!is_valid_semver("a.b.c"));
        assert!(!is_valid_semver(""));
    }

    #[test]
    fn default_operator_is_exact_match() {
        assert!(matches("1.2.0", "1.2.0"));
        assert!(!matches("1.2.0", "1.2.1"));
    }

    #[test]
    fn explicit_equals_matches_same_version() {
        assert!(matches("= 1.2.0", "1.2.0"));
        assert!(matches("=1.2.0", "1.2.0"));
    }

    #[test]
    fn greater_or_equal_includes_boundary() {
        assert!(matches(">= 1.2.0", "1.2.0"));
        assert!(matches(">= 1.2.0", "1.3.0"));
        assert!(!matches(">= 1.2.0", "1.1.9"));
    }

    #[test]
    fn strictly_greater_excludes_boundary() {
        assert!(!matches("> 1.2.0", "1.2.0"));
        assert!(matches("> 1.2.0", "1.2.1"));
        assert!(matches("> 1.2.0", "2.0.0"));
    }

    #[test]
    fn malformed_constraint_never_matches() {
        assert!(!matches("~> 1.2.0", "1.2.0"));
        assert!(!matches(">= banana", "1.2.0"));
        assert!(!matches("", "1.2.0"));
    }

    #[test]
    fn malformed_actual_never_matches() {
        assert!(!matches(">= 1.2.0", "1.2"));
        assert!(!matches("1.2.0", "not-a-version"));
    }

    #[test]
    fn constraint_parse_roundtrip() {
        let c = Constraint::parse(">= 2.0.0").unwrap();
        assert_eq!(c.op, Op::Ge);
        assert_eq!(c.version, Version::new(2, 0, 0));
    }

    #[test]
    fn whitespace_tolerated_around_operator_and_version() {
        assert!(matches("  >=  1.2.0  ", "1.2.0"));
    }
}
