//! Cairn - Compliance profile validation and platform applicability checking.
//!
//! Cairn takes a packaged compliance/test profile (a directory tree, zip, or
//! tar+gzip archive), resolves its metadata, decides whether the profile
//! applies to a concrete target platform, and aggregates every diagnostic
//! produced along the way into a structured check report.
//!
//! # Modules
//!
//! - [`archive`] - Profile materialization and content digests
//! - [`check`] - The profile checker and its report
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`license`] - SPDX license identifier validation
//! - [`metadata`] - Metadata parsing, support normalization, finalization
//! - [`platform`] - Platform facts and support matching
//! - [`profile`] - The loaded profile and its top-level operations
//! - [`version`] - Version constraint parsing and evaluation
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
//!
//! For file-based profile loading, see the integration tests.

pub mod archive;
pub mod check;
pub mod cli;
pub mod error;
pub mod license;
pub mod metadata;
pub mod platform;
pub mod profile;
pub mod version;

pub use error::{CairnError, Result};
pub use profile::Profile;

/// The engine's own version, the default target of `cairn` runtime
/// constraints in support declarations.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
