//! Support clause normalization.
//!
//! The `supports` field of a profile's metadata has accumulated three
//! spellings over time:
//!
//! - legacy scalar: `supports: linux`
//! - legacy array: `supports: [linux, windows]`
//! - structured: `supports: [{os-family: linux, release: "14.04"}]`
//!
//! Both legacy forms are sugar for `{os-family: <value>}` and trigger a
//! single deprecation warning regardless of how many legacy entries exist.
//! Normalization also coerces numeric releases to their string
//! representation, so a YAML float like `14.04` compares as `"14.04"`
//! without precision loss.

use serde_yaml::Value;

/// One canonical constraint set from a `supports` declaration.
///
/// Each predicate is optional; absence means "don't care" for that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportSet {
    /// Target os family, matched against the family ancestor chain.
    pub os_family: Option<String>,
    /// Target os name (distribution), matched exactly.
    pub os_name: Option<String>,
    /// Target release, exact string equality after stringification.
    pub release: Option<String>,
    /// Version constraint on the engine itself (`cairn` key).
    pub runtime: Option<String>,
}

impl SupportSet {
    /// A set constraining only the os family (the legacy sugar target).
    pub fn os_family(family: impl Into<String>) -> Self {
        Self {
            os_family: Some(family.into()),
            ..Self::default()
        }
    }

    /// True when no predicate is declared at all.
    pub fn is_empty(&self) -> bool {
        self.os_family.is_none()
            && self.os_name.is_none()
            && self.release.is_none()
            && self.runtime.is_none()
    }
}

/// Normalize a raw `supports` value into canonical constraint sets.
///
/// Returns the sets plus at most one deprecation warning for legacy
/// scalar/array entries. Absent or null input yields an empty sequence and
/// no warning.
pub fn normalize(raw: Option<&Value>) -> (Vec<SupportSet>, Option<String>) {
    let mut sets = Vec::new();
    let mut legacy: Option<String> = None;

    match raw {
        None | Some(Value::Null) => {}
        Some(Value::String(family)) => {
            legacy.get_or_insert_with(|| deprecation_for(family));
            sets.push(SupportSet::os_family(family.clone()));
        }
        Some(Value::Sequence(entries)) => {
            for entry in entries {
                match entry {
                    Value::String(family) => {
                        legacy.get_or_insert_with(|| deprecation_for(family));
                        sets.push(SupportSet::os_family(family.clone()));
                    }
                    Value::Mapping(_) => sets.push(set_from_mapping(entry)),
                    _ => {}
                }
            }
        }
        Some(entry @ Value::Mapping(_)) => sets.push(set_from_mapping(entry)),
        Some(_) => {}
    }

    (sets, legacy)
}

/// Build a constraint set from one structured mapping entry.
///
/// Key spellings are normalized (`os_family` = `os-family`, bare `os` means
/// os-name); unknown keys are ignored.
fn set_from_mapping(entry: &Value) -> SupportSet {
    let mut set = SupportSet::default();
    let Value::Mapping(map) = entry else {
        return set;
    };
    for (key, value) in map {
        let Some(key) = key.as_str() else { continue };
        let value = stringify(value);
        match key {
            "os-family" | "os_family" => set.os_family = value,
            "os-name" | "os_name" | "os" => set.os_name = value,
            "release" => set.release = value,
            "cairn" => set.runtime = value,
            _ => {}
        }
    }
    set
}

/// Stringify a predicate value without float round-tripping surprises:
/// serde_yaml renders `14.04` back as `"14.04"`.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deprecation_for(family: &str) -> String {
    format!(
        "Do not use deprecated `supports: {family}` syntax. Instead use:\nsupports:\n  - os-family: {family}\n\n"
    )
}
