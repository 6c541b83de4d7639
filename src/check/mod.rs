//! Profile checking.
//!
//! The checker drives the validators over a loaded profile and aggregates
//! their findings into a [`CheckReport`]. It runs in fixed stages, none of
//! which is retried: metadata validation, control validation, report
//! assembly. Validation failures are collected, never short-circuited, so a
//! single pass reports every independent problem; only archive
//! materialization failures (handled during [`Profile::load`]) are fatal.
//!
//! Progress and success notices go to the log; errors and warnings land in
//! the report as well, where errors alone decide validity.
//!
//! [`Profile::load`]: crate::profile::Profile::load

pub mod controls;
pub mod report;

use crate::license::{self, LicenseClass};
use crate::profile::Profile;
use crate::version;
use tracing::{error, info, warn};

pub use controls::Control;
pub use report::CheckReport;

/// Aggregates diagnostics for one profile check invocation.
pub struct ProfileChecker<'a> {
    profile: &'a Profile,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl<'a> ProfileChecker<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Run all stages and assemble the report.
    pub fn run(mut self) -> CheckReport {
        info!("Checking profile in {}", self.profile.location());
        self.check_metadata();
        let control_count = self.check_controls();

        CheckReport {
            valid: self.errors.is_empty(),
            location: self.profile.location().to_string(),
            profile_id: self.profile.name().to_string(),
            control_count,
            errors: self.errors,
            warnings: self.warnings,
        }
    }

    /// Stage one: version, descriptive fields, license, name hygiene.
    fn check_metadata(&mut self) {
        let meta = self.profile.metadata();
        let doc = meta.source.document_name();

        if meta.source.is_legacy() {
            self.warn(format!(
                "The use of `{}` is deprecated. Use `{}`.",
                crate::metadata::LEGACY_FILE,
                crate::metadata::DECLARATIVE_FILE
            ));
        }

        let errors_before = self.errors.len();

        match meta.version.as_deref() {
            None => self.error(format!("Missing profile version in {doc}")),
            Some(v) if !version::is_valid_semver(v) => {
                self.error("Version needs to be in SemVer format".to_string())
            }
            Some(_) => {}
        }

        let optional_fields = [
            ("title", &meta.title),
            ("summary", &meta.summary),
            ("maintainer", &meta.maintainer),
            ("copyright", &meta.copyright),
            ("license", &meta.license),
        ];
        for (field, value) in optional_fields {
            if value.is_none() {
                self.warn(format!("Missing profile {field} in {doc}"));
            }
        }

        if let LicenseClass::NonStandard = license::classify(meta.license.as_deref()) {
            self.warn(format!(
                "License '{}' needs to be in SPDX format. See https://spdx.org/licenses/.",
                meta.license.as_deref().unwrap_or_default()
            ));
        }

        if let Some(name) = &meta.name {
            if name.contains('/') {
                self.warn(format!(
                    "Your profile name ({name}) contains a slash which will not be \
                     permitted in a future release. Please change your profile name \
                     in the `{doc}` file."
                ));
            }
        }

        if self.errors.len() == errors_before {
            info!("Metadata OK.");
        }
    }

    /// Stage two: enumerate controls and validate their structure.
    ///
    /// Returns the number of controls discovered.
    fn check_controls(&mut self) -> usize {
        let (controls, parse_errors) = controls::discover(self.profile.archive());
        for message in parse_errors {
            self.error(message);
        }

        if controls.is_empty() {
            self.warn("No controls or tests were defined.".to_string());
            return 0;
        }

        info!("Found {} controls.", controls.len());
        let mut structurally_ok = true;
        for control in &controls {
            for defect in control.defects() {
                self.error(defect);
                structurally_ok = false;
            }
        }
        if structurally_ok {
            info!("Control definitions OK.");
        }
        controls.len()
    }

    fn error(&mut self, message: String) {
        error!("{}", message);
        self.errors.push(message);
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}
