//! Platform facts and support matching.
//!
//! A check target is described by [`PlatformFacts`]: os name, os family,
//! release, plus the family ancestor chain used for hierarchical `os-family`
//! matching (a profile declaring `os-family: linux` applies to any
//! linux-family distribution, ubuntu included).
//!
//! Matching over a profile's normalized support sets is a disjunction across
//! sets and a conjunction within one set: an empty sequence means the
//! profile declared no restriction and supports everything.
//!
//! # Example
//!
//! ```
//! use cairn::metadata::SupportSet;
//! use cairn::platform::{supports_platform, PlatformFacts};
//!
//! let facts = PlatformFacts::new("ubuntu", "debian", "14.04");
//! let sets = vec![SupportSet::os_family("linux")];
//! assert!(supports_platform(&sets, &facts, cairn::VERSION));
//! ```

use crate::metadata::SupportSet;
use crate::version;

/// The detected identity of a check target.
///
/// Facts are read-only inputs supplied by an external backend; matching
/// never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFacts {
    /// Distribution name, e.g. `ubuntu`, `centos`, `windows`.
    pub os_name: String,
    /// Immediate family, e.g. `debian`, `redhat`, `windows`.
    pub os_family: String,
    /// Release version, already in string form (`"14.04"`).
    pub release: String,
    /// Family ancestor chain, most specific first, used for hierarchical
    /// `os-family` matching.
    families: Vec<String>,
}

impl PlatformFacts {
    /// Build facts with the family chain derived from the builtin table.
    pub fn new(
        os_name: impl Into<String>,
        os_family: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        let os_family = os_family.into();
        let families = family_hierarchy(&os_family);
        Self {
            os_name: os_name.into(),
            os_family,
            release: release.into(),
            families,
        }
    }

    /// Build facts with an explicit ancestor chain, for targets the builtin
    /// table does not know about.
    pub fn with_hierarchy(
        os_name: impl Into<String>,
        os_family: impl Into<String>,
        release: impl Into<String>,
        families: Vec<String>,
    ) -> Self {
        Self {
            os_name: os_name.into(),
            os_family: os_family.into(),
            release: release.into(),
            families,
        }
    }

    /// Whether this target belongs to the given family, walking the
    /// ancestor chain. `os` is the universal root and matches everything.
    pub fn in_family(&self, family: &str) -> bool {
        family == "os" || self.families.iter().any(|f| f == family)
    }
}

/// Family ancestor chain for a known immediate family, most specific first.
///
/// Unknown families get a single-element chain (themselves), so matching
/// degrades to exact equality.
pub fn family_hierarchy(family: &str) -> Vec<String> {
    let chain: Vec<&str> = match family {
        "debian" | "redhat" | "suse" | "arch" | "alpine" | "gentoo" | "fedora" | "amazon" => {
            vec![family, "linux", "unix"]
        }
        "linux" => vec!["linux", "unix"],
        "darwin" => vec!["darwin", "bsd", "unix"],
        "freebsd" | "openbsd" | "netbsd" => vec![family, "bsd", "unix"],
        "bsd" => vec!["bsd", "unix"],
        "solaris" | "aix" | "hpux" => vec![family, "unix"],
        "unix" => vec!["unix"],
        "windows" => vec!["windows"],
        other => vec![other],
    };
    chain.into_iter().map(str::to_string).collect()
}

/// Evaluate a target against a profile's support sets.
///
/// An empty sequence declares no restriction and answers `true` for any
/// facts. Otherwise at least one set must match; within a set, every
/// declared predicate must hold. The `cairn` runtime predicate delegates to
/// the version matcher against `runtime_version`.
pub fn supports_platform(
    sets: &[SupportSet],
    facts: &PlatformFacts,
    runtime_version: &str,
) -> bool {
    sets.is_empty() || sets.iter().any(|set| set_matches(set, facts, runtime_version))
}

/// Evaluate only the runtime-version predicates of the support sets.
///
/// `true` when no set declares one, else when any declared constraint
/// matches the given engine version.
pub fn supports_runtime(sets: &[SupportSet], runtime_version: &str) -> bool {
    let mut any_declared = false;
    for constraint in sets.iter().filter_map(|set| set.runtime.as_deref()) {
        any_declared = true;
        if version::matches(constraint, runtime_version) {
            return true;
        }
    }
    !any_declared
}

fn set_matches(set: &SupportSet, facts: &PlatformFacts, runtime_version: &str) -> bool {
    if let Some(family) = &set.os_family {
        if !facts.in_family(family) {
            return false;
        }
    }
    if let Some(name) = &set.os_name {
        if name != &facts.os_name {
            return false;
        }
    }
    if let Some(release) = &set.release {
        // exact equality only; release ranges are not part of the grammar
        if release != &facts.release {
            return false;
        }
    }
    if let Some(constraint) = &set.runtime {
        if !version::matches(constraint, runtime_version) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ubuntu1404() -> PlatformFacts {
        PlatformFacts::new("ubuntu", "debian", "14.04")
    }

    #[test]
    fn empty_sets_support_everything() {
        assert!(supports_platform(&[], &ubuntu1404(), crate::VERSION));
        let windows = PlatformFacts::new("windows", "windows", "10.0");
        assert!(supports_platform(&[], &windows, crate::VERSION));
    }

    #[test]
    fn os_name_matches_exactly() {
        let sets = vec![SupportSet {
            os_name: Some("ubuntu".into()),
            ..Default::default()
        }];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn family_matches_through_hierarchy() {
        let sets = vec![SupportSet::os_family("linux")];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));

        let sets = vec![SupportSet::os_family("unix")];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));

        let sets = vec![SupportSet::os_family("debian")];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn os_root_family_matches_everything() {
        let sets = vec![SupportSet::os_family("os")];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));
        let windows = PlatformFacts::new("windows", "windows", "10.0");
        assert!(supports_platform(&sets, &windows, crate::VERSION));
    }

    #[test]
    fn wrong_family_is_rejected() {
        let sets = vec![SupportSet::os_family("windows")];
        assert!(!supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn release_matches_exact_string() {
        let sets = vec![SupportSet {
            release: Some("14.04".into()),
            ..Default::default()
        }];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn wrong_release_is_rejected() {
        let sets = vec![SupportSet {
            release: Some("12.04".into()),
            ..Default::default()
        }];
        assert!(!supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn name_and_release_combine_conjunctively() {
        let matching = vec![SupportSet {
            os_name: Some("ubuntu".into()),
            release: Some("14.04".into()),
            ..Default::default()
        }];
        assert!(supports_platform(&matching, &ubuntu1404(), crate::VERSION));

        let mismatched = vec![SupportSet {
            os_name: Some("ubuntu".into()),
            release: Some("12.04".into()),
            ..Default::default()
        }];
        assert!(!supports_platform(&mismatched, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn sets_combine_disjunctively() {
        let sets = vec![
            SupportSet::os_family("windows"),
            SupportSet::os_family("debian"),
        ];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn unrelated_os_name_is_rejected() {
        let sets = vec![SupportSet {
            os_name: Some("windows".into()),
            ..Default::default()
        }];
        assert!(!supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn runtime_constraint_in_set_uses_version_matcher() {
        let sets = vec![SupportSet {
            runtime: Some(format!(">= {}", crate::VERSION)),
            ..Default::default()
        }];
        assert!(supports_platform(&sets, &ubuntu1404(), crate::VERSION));

        let sets = vec![SupportSet {
            runtime: Some("> 99.0.0".into()),
            ..Default::default()
        }];
        assert!(!supports_platform(&sets, &ubuntu1404(), crate::VERSION));
    }

    #[test]
    fn supports_runtime_true_without_declared_constraints() {
        assert!(supports_runtime(&[], crate::VERSION));
        let sets = vec![SupportSet::os_family("linux")];
        assert!(supports_runtime(&sets, crate::VERSION));
    }

    #[test]
    fn supports_runtime_current_version() {
        let eq = vec![SupportSet {
            runtime: Some(crate::VERSION.to_string()),
            ..Default::default()
        }];
        assert!(supports_runtime(&eq, crate::VERSION));

        let ge = vec![SupportSet {
            runtime: Some(format!(">= {}", crate::VERSION)),
            ..Default::default()
        }];
        assert!(supports_runtime(&ge, crate::VERSION));
    }

    #[test]
    fn supports_runtime_rejects_future_versions() {
        let sets = vec![SupportSet {
            runtime: Some(">= 99.0.0".into()),
            ..Default::default()
        }];
        assert!(!supports_runtime(&sets, crate::VERSION));

        let sets = vec![SupportSet {
            runtime: Some("> 99.0.0".into()),
            ..Default::default()
        }];
        assert!(!supports_runtime(&sets, crate::VERSION));
    }

    #[test]
    fn unknown_family_degrades_to_exact_match() {
        let facts = PlatformFacts::new("plan9", "plan9", "4");
        assert!(facts.in_family("plan9"));
        assert!(!facts.in_family("unix"));
    }

    #[test]
    fn explicit_hierarchy_overrides_builtin_table() {
        let facts = PlatformFacts::with_hierarchy(
            "custom",
            "custom",
            "1.0",
            vec!["custom".into(), "linux".into(), "unix".into()],
        );
        assert!(facts.in_family("linux"));
    }
}
