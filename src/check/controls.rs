//! Control discovery and structural validation.
//!
//! Controls live in YAML documents under `controls/` in the profile
//! archive; each document holds a sequence of control definitions. The DSL
//! inside a check is opaque at this layer; structurally a control needs an
//! id, a title, and at least one check entry.

use crate::archive::ProfileArchive;
use serde::Deserialize;
use serde_yaml::Value;

/// Directory controls are discovered under.
const CONTROLS_DIR: &str = "controls/";

/// One control definition as authored.
#[derive(Debug, Clone, Deserialize)]
pub struct Control {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub impact: Option<f64>,
    /// Opaque check entries; only their presence matters here.
    #[serde(default)]
    pub checks: Vec<Value>,
    /// Document the control was defined in (filled during discovery).
    #[serde(skip)]
    pub source: String,
}

impl Control {
    /// Structural defects of this control, as report-ready messages.
    pub fn defects(&self) -> Vec<String> {
        let mut defects = Vec::new();
        let label = self
            .id
            .clone()
            .unwrap_or_else(|| format!("in {}", self.source));
        if self.id.as_deref().map_or(true, str::is_empty) {
            defects.push(format!("Control {} is missing an id.", label));
        }
        if self.title.as_deref().map_or(true, str::is_empty) {
            defects.push(format!("Control {} is missing a title.", label));
        }
        if self.checks.is_empty() {
            defects.push(format!("Control {} has no checks defined.", label));
        }
        defects
    }
}

/// Enumerate control definitions in the archive.
///
/// Returns the parsed controls plus one error message per control document
/// that failed to parse; a bad document never aborts discovery of the rest.
pub fn discover(archive: &ProfileArchive) -> (Vec<Control>, Vec<String>) {
    let mut controls = Vec::new();
    let mut errors = Vec::new();

    let paths: Vec<String> = archive
        .paths()
        .filter(|p| {
            p.starts_with(CONTROLS_DIR) && (p.ends_with(".yml") || p.ends_with(".yaml"))
        })
        .map(str::to_string)
        .collect();

    for path in paths {
        let Some(content) = archive.read_str(&path) else {
            errors.push(format!("Failed to read controls in {}: not valid UTF-8", path));
            continue;
        };
        match serde_yaml::from_str::<Option<Vec<Control>>>(content) {
            Ok(parsed) => {
                for mut control in parsed.unwrap_or_default() {
                    control.source = path.clone();
                    controls.push(control);
                }
            }
            Err(e) => errors.push(format!("Failed to parse controls in {}: {}", path, e)),
        }
    }

    (controls, errors)
}

/// Accept quoted strings and bare YAML scalars (numbers) as ids/titles.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(_) => None,
    })
}
