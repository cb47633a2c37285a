//! composer.json stamping on disk

use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;

use composer_version::manifest::{ManifestError, Source, stamp_manifest};
use composer_version::version::{DeriveOptions, derive_version};

fn project(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("composer.json"), content).unwrap();
    dir
}

fn read_manifest(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("composer.json")).unwrap()
}

#[test]
fn stamp_writes_derived_version_and_keeps_key_order() {
    let dir = project(r#"{"name":"acme/widgets","version":"0.1","require":{"php":">=8.1"}}"#);
    let derived = derive_version("5.0", true, DeriveOptions::default()).unwrap();

    let manifest = stamp_manifest(dir.path(), &derived, None, 4).unwrap();

    assert_eq!(manifest.package_name(), Some("acme/widgets"));
    assert_eq!(
        read_manifest(&dir),
        r#"{
    "name": "acme/widgets",
    "version": "5.0.x-dev",
    "require": {
        "php": ">=8.1"
    },
    "version_normalized": "5.0.9999999.9999999-dev"
}
"#
    );
}

#[test]
fn stamp_records_source_and_honours_indent() {
    let dir = project(r#"{"name":"acme/widgets"}"#);
    let derived = derive_version("origin/master", true, DeriveOptions::default()).unwrap();
    let source = Source::git("https://github.com/acme/widgets.git", "0123abcd");

    stamp_manifest(dir.path(), &derived, Some(&source), 2).unwrap();

    let content = read_manifest(&dir);
    assert!(content.starts_with("{\n  \"name\""));

    let written: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        written,
        json!({
            "name": "acme/widgets",
            "version": "dev-master",
            "version_normalized": "9999999-dev",
            "source": {
                "type": "git",
                "url": "https://github.com/acme/widgets.git",
                "reference": "0123abcd"
            }
        })
    );
}

#[test]
fn stamping_twice_gives_the_same_file() {
    let dir = project(r#"{"name":"acme/widgets"}"#);
    let derived = derive_version("v1.2.3", false, DeriveOptions::default()).unwrap();

    stamp_manifest(dir.path(), &derived, None, 4).unwrap();
    let first = read_manifest(&dir);
    stamp_manifest(dir.path(), &derived, None, 4).unwrap();

    assert_eq!(read_manifest(&dir), first);
}

#[test]
fn missing_manifest_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let derived = derive_version("1.0", false, DeriveOptions::default()).unwrap();

    let err = stamp_manifest(dir.path(), &derived, None, 4).unwrap_err();

    assert!(matches!(err, ManifestError::Io { .. }));
}

#[test]
fn malformed_manifest_is_left_untouched() {
    let dir = project("{ not json");
    let derived = derive_version("1.0", false, DeriveOptions::default()).unwrap();

    let err = stamp_manifest(dir.path(), &derived, None, 4).unwrap_err();

    assert!(matches!(err, ManifestError::Json { .. }));
    assert_eq!(read_manifest(&dir), "{ not json");
}
