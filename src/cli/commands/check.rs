//! The `check` command.
//!
//! Loads the profile, runs the checker, and renders the report. The report
//! itself is the stable artifact; rendering here is deliberately thin.

use crate::check::CheckReport;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::error::Result;
use crate::profile::{LoadOptions, Profile};

/// Run a profile check and print the report in the requested format.
///
/// Returns the process exit code: 0 for a valid profile, 1 otherwise.
pub fn execute(args: &CheckArgs) -> Result<u8> {
    let options = LoadOptions {
        profile_id: args.id.clone(),
        ..Default::default()
    };
    let profile = Profile::load_with_options(&args.path, &options)?;
    let report = profile.check();

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("failed to render report: {e}"))?;
            println!("{json}");
        }
    }

    Ok(if report.valid { 0 } else { 1 })
}

fn print_text(report: &CheckReport) {
    println!("Profile: {} ({})", report.profile_id, report.location);
    println!("Controls: {}", report.control_count);
    for error in &report.errors {
        println!("  error: {error}");
    }
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
    let summary = format!(
        "{} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
    if report.valid {
        println!("Profile is valid ({summary})");
    } else {
        println!("Profile is invalid ({summary})");
    }
}
