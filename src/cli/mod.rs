//! Command-line interface.
//!
//! The CLI is a thin collaborator around the library: it parses arguments,
//! runs the requested command, and renders the resulting [`CheckReport`]
//! (text or JSON). All validation semantics live in the library modules.
//!
//! [`CheckReport`]: crate::check::CheckReport

pub mod args;
pub mod commands;

use crate::error::Result;

pub use args::{CheckArgs, Cli, Commands, OutputFormat};

/// Dispatch a parsed CLI invocation; returns the process exit code.
pub fn dispatch(cli: &Cli) -> Result<u8> {
    match &cli.command {
        Commands::Check(args) => commands::check::execute(args),
    }
}
