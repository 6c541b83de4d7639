//! Metadata source formats.
//!
//! Profile metadata arrives in one of two document forms: the declarative
//! `cairn.yml` (primary) or the deprecated procedural `metadata.script`,
//! which assigns the same keys one line at a time:
//!
//! ```text
//! name    "my-profile"
//! version "1.0.0"
//! supports "linux"
//! ```
//!
//! Both forms land in the same raw key/value mapping; the format is tracked
//! so diagnostics can name the right document and so the legacy form fires
//! its deprecation warning. This is the only behavioral difference between
//! the two, which is why the format is a tagged variant and not a trait.

use crate::error::{CairnError, Result};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

/// Declarative metadata document filename.
pub const DECLARATIVE_FILE: &str = "cairn.yml";
/// Deprecated procedural metadata filename.
pub const LEGACY_FILE: &str = "metadata.script";

/// One `key "value"` assignment line in a legacy script.
static SCRIPT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*([A-Za-z_][A-Za-z0-9_-]*)\s+(?:"([^"]*)"|'([^']*)')\s*$"#).unwrap()
});

/// Which document form produced the raw metadata mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// `cairn.yml`, the primary form.
    #[default]
    Declarative,
    /// `metadata.script`, deprecated.
    Legacy,
}

impl SourceFormat {
    /// Document filename for diagnostics ("Missing profile version in ...").
    pub fn document_name(&self) -> &'static str {
        match self {
            SourceFormat::Declarative => DECLARATIVE_FILE,
            SourceFormat::Legacy => LEGACY_FILE,
        }
    }

    /// Whether this form should fire the legacy-format deprecation warning.
    pub fn is_legacy(&self) -> bool {
        matches!(self, SourceFormat::Legacy)
    }

    /// Parse document content into the raw key/value mapping.
    pub fn parse(&self, content: &str) -> Result<Mapping> {
        match self {
            SourceFormat::Declarative => parse_declarative(content),
            SourceFormat::Legacy => Ok(evaluate_script(content)),
        }
    }
}

fn parse_declarative(content: &str) -> Result<Mapping> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| CairnError::MetadataParseError {
            source_name: DECLARATIVE_FILE.to_string(),
            message: e.to_string(),
        })?;
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(CairnError::MetadataParseError {
            source_name: DECLARATIVE_FILE.to_string(),
            message: "expected a key/value document".to_string(),
        }),
    }
}

/// Evaluate a legacy script into the equivalent key/value mapping.
///
/// Only simple `key "value"` assignments are recognized; comments and blank
/// lines are skipped, anything else is ignored. Repeated `supports` lines
/// accumulate into a sequence so the legacy array form survives evaluation.
fn evaluate_script(content: &str) -> Mapping {
    let mut map = Mapping::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(caps) = SCRIPT_LINE.captures(line) else {
            continue;
        };
        let key = caps[1].to_string();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default()
            .to_string();

        if key == "supports" {
            let entry = map
                .entry(Value::String(key))
                .or_insert_with(|| Value::Sequence(Vec::new()));
            if let Value::Sequence(seq) = entry {
                seq.push(Value::String(value));
            }
        } else {
            map.insert(Value::String(key), Value::String(value));
        }
    }
    map
}
