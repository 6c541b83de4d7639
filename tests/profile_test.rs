//! End-to-end profile loading and checking.
//!
//! Exercises the public API the way a collaborator would: load a profile
//! from each container format, check it, and inspect the report.

use cairn::archive::ProfileArchive;
use cairn::platform::PlatformFacts;
use cairn::profile::{LoadOptions, Profile};
use cairn::CairnError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const COMPLETE_METADATA: &str = r#"name: complete
title: Complete fixture
version: "1.0.0"
summary: A fully described profile
maintainer: Fixture Maintainers
copyright: Fixture Maintainers
license: Apache-2.0
supports:
  - os-family: linux
"#;

const FILESYSTEM_CONTROL: &str = r#"- id: test01
  title: Catchy title
  desc: There should always be a /proc
  impact: 0.5
  checks:
    - file: /proc
      it: should be mounted
"#;

/// Write the complete fixture profile as a directory tree.
fn write_profile_dir(root: &Path) {
    fs::create_dir_all(root.join("controls")).unwrap();
    fs::write(root.join("cairn.yml"), COMPLETE_METADATA).unwrap();
    fs::write(root.join("controls/filesystem.yml"), FILESYSTEM_CONTROL).unwrap();
}

/// Package the same logical content as a zip archive.
fn write_profile_zip(path: &Path) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in [
        ("cairn.yml", COMPLETE_METADATA),
        ("controls/filesystem.yml", FILESYSTEM_CONTROL),
    ] {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// Package the same logical content as a tar+gzip archive.
fn write_profile_tgz(path: &Path) {
    let file = File::create(path).unwrap();
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in [
        ("cairn.yml", COMPLETE_METADATA),
        ("controls/filesystem.yml", FILESYSTEM_CONTROL),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

fn fixture_paths(temp: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let dir = temp.path().join("complete-profile");
    write_profile_dir(&dir);
    let zip = temp.path().join("complete-profile.zip");
    write_profile_zip(&zip);
    let tgz = temp.path().join("complete-profile.tar.gz");
    write_profile_tgz(&tgz);
    (dir, zip, tgz)
}

#[test]
fn digest_is_identical_across_container_formats() {
    let temp = TempDir::new().unwrap();
    let (dir, zip, tgz) = fixture_paths(&temp);

    let from_dir = ProfileArchive::materialize(&dir).unwrap();
    let from_zip = ProfileArchive::materialize(&zip).unwrap();
    let from_tgz = ProfileArchive::materialize(&tgz).unwrap();

    assert_eq!(from_dir.sha256(), from_zip.sha256());
    assert_eq!(from_dir.sha256(), from_tgz.sha256());
}

#[test]
fn logical_listing_is_identical_across_container_formats() {
    let temp = TempDir::new().unwrap();
    let (dir, zip, tgz) = fixture_paths(&temp);

    let from_dir = ProfileArchive::materialize(&dir).unwrap();
    let from_zip = ProfileArchive::materialize(&zip).unwrap();
    let from_tgz = ProfileArchive::materialize(&tgz).unwrap();

    let dir_paths: Vec<&str> = from_dir.paths().collect();
    assert_eq!(dir_paths, from_zip.paths().collect::<Vec<_>>());
    assert_eq!(dir_paths, from_tgz.paths().collect::<Vec<_>>());
    assert_eq!(
        from_dir.read("cairn.yml"),
        from_zip.read("cairn.yml")
    );
}

#[test]
fn check_passes_for_each_container_format() {
    let temp = TempDir::new().unwrap();
    let (dir, zip, tgz) = fixture_paths(&temp);

    for path in [dir, zip, tgz] {
        let profile = Profile::load(&path).unwrap();
        let report = profile.check();
        assert!(report.valid, "profile at {} should be valid", path.display());
        assert_eq!(report.control_count, 1);
        assert_eq!(report.errors.len(), 0);
        assert_eq!(report.warnings.len(), 0);
        assert_eq!(report.profile_id, "complete");
    }
}

#[test]
fn profile_sha256_matches_archive_digest() {
    let temp = TempDir::new().unwrap();
    let (dir, _, _) = fixture_paths(&temp);

    let profile = Profile::load(&dir).unwrap();
    let archive = ProfileArchive::materialize(&dir).unwrap();
    assert_eq!(profile.sha256(), archive.sha256());
}

#[test]
fn empty_profile_collects_every_finding_in_one_pass() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("empty-metadata");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("cairn.yml"), "---\n").unwrap();

    let report = Profile::load(&root).unwrap().check();
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.warnings.len(), 6);
    assert_eq!(report.control_count, 0);
}

#[test]
fn supports_matching_against_detected_platform() {
    let temp = TempDir::new().unwrap();
    let (dir, _, _) = fixture_paths(&temp);
    let profile = Profile::load(&dir).unwrap();

    assert!(profile.supports_platform(&PlatformFacts::new("ubuntu", "debian", "14.04")));
    assert!(profile.supports_platform(&PlatformFacts::new("centos", "redhat", "7.2")));
    assert!(!profile.supports_platform(&PlatformFacts::new("windows", "windows", "10.0")));
}

#[test]
fn release_constraint_matches_yaml_float_releases() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("release-pinned");
    fs::create_dir_all(&root).unwrap();
    fs::write(
        root.join("cairn.yml"),
        "name: pinned\nsupports:\n  - os-name: ubuntu\n    release: 14.04\n",
    )
    .unwrap();

    let profile = Profile::load(&root).unwrap();
    assert!(profile.supports_platform(&PlatformFacts::new("ubuntu", "debian", "14.04")));
    assert!(!profile.supports_platform(&PlatformFacts::new("ubuntu", "debian", "12.04")));
}

#[test]
fn explicit_profile_id_flows_into_the_report() {
    let temp = TempDir::new().unwrap();
    let (dir, _, _) = fixture_paths(&temp);

    let options = LoadOptions {
        profile_id: Some("renamed".into()),
        ..Default::default()
    };
    let report = Profile::load_with_options(&dir, &options).unwrap().check();
    assert_eq!(report.profile_id, "renamed");
}

#[test]
fn corrupt_zip_aborts_before_any_validation() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("corrupt.zip");
    fs::write(&path, b"PK\x03\x04 truncated garbage").unwrap();

    let result = Profile::load(&path);
    assert!(matches!(result, Err(CairnError::ArchiveReadError { .. })));
}

#[test]
fn unsupported_container_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profile.7z");
    fs::write(&path, b"7z\xbc\xaf\x27\x1c").unwrap();

    let result = Profile::load(&path);
    assert!(matches!(result, Err(CairnError::UnsupportedArchive { .. })));
}
