//! composer.json stamping
//!
//! Packages built from a git reference carry their derived version inside
//! the manifest. Stamping rewrites `version`, `version_normalized` and,
//! optionally, `source` while keeping every other key in its original order.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::info;

use crate::version::DerivedVersion;

pub const MANIFEST_FILE: &str = "composer.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where a package was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    /// Commit the package was built from
    pub reference: String,
}

impl Source {
    pub fn git(url: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            kind: "git".to_string(),
            url: url.into(),
            reference: reference.into(),
        }
    }
}

/// A decoded composer.json object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposerManifest(IndexMap<String, Value>);

impl ComposerManifest {
    /// Read `<dir>/composer.json`
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ManifestError::Json { path, source })
    }

    /// Package name such as `vendor/package`, if present
    pub fn package_name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Record the derived version, and the source when given
    pub fn stamp(
        &mut self,
        derived: &DerivedVersion,
        source: Option<&Source>,
    ) -> Result<(), serde_json::Error> {
        self.0.insert(
            "version".to_string(),
            Value::String(derived.version.clone()),
        );
        self.0.insert(
            "version_normalized".to_string(),
            Value::String(derived.normalized.clone()),
        );

        if let Some(source) = source {
            self.0.insert("source".to_string(), serde_json::to_value(source)?);
        }

        Ok(())
    }

    /// Render as pretty JSON with `indent` spaces and a trailing newline
    pub fn to_json(&self, indent: usize) -> Result<String, serde_json::Error> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        buf.push(b'\n');

        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Overwrite `<dir>/composer.json`
    pub fn save(&self, dir: &Path, indent: usize) -> Result<(), ManifestError> {
        let path = dir.join(MANIFEST_FILE);
        let content = self.to_json(indent).map_err(|source| ManifestError::Json {
            path: path.clone(),
            source,
        })?;

        fs::write(&path, content).map_err(|source| ManifestError::Io { path, source })
    }
}

/// Load, stamp and save the manifest in `dir`.
pub fn stamp_manifest(
    dir: &Path,
    derived: &DerivedVersion,
    source: Option<&Source>,
    indent: usize,
) -> Result<ComposerManifest, ManifestError> {
    let mut manifest = ComposerManifest::load(dir)?;
    manifest
        .stamp(derived, source)
        .map_err(|source| ManifestError::Json {
            path: dir.join(MANIFEST_FILE),
            source,
        })?;
    manifest.save(dir, indent)?;

    info!(
        "Stamped {} with version {} ({})",
        manifest.package_name().unwrap_or(MANIFEST_FILE),
        derived.version,
        derived.normalized
    );

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn derived(version: &str, normalized: &str) -> DerivedVersion {
        DerivedVersion {
            version: version.to_string(),
            normalized: normalized.to_string(),
        }
    }

    fn manifest(value: Value) -> ComposerManifest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn stamp_sets_version_fields() {
        let mut manifest = manifest(json!({ "name": "acme/widgets" }));

        manifest.stamp(&derived("5.0", "5.0.0.0"), None).unwrap();

        assert_eq!(manifest.get("version"), Some(&json!("5.0")));
        assert_eq!(manifest.get("version_normalized"), Some(&json!("5.0.0.0")));
        assert_eq!(manifest.get("source"), None);
    }

    #[test]
    fn source_serializes_kind_as_type() {
        let source = Source::git("https://github.com/acme/widgets.git", "abc123");

        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            json!({
                "type": "git",
                "url": "https://github.com/acme/widgets.git",
                "reference": "abc123"
            })
        );
    }

    #[test]
    fn stamp_embeds_source_when_given() {
        let mut manifest = manifest(json!({ "name": "acme/widgets" }));
        let source = Source::git("git@github.com:acme/widgets.git", "abc123");

        manifest.stamp(&derived("dev-master", "9999999-dev"), Some(&source)).unwrap();

        assert_eq!(
            manifest.get("source"),
            Some(&json!({
                "type": "git",
                "url": "git@github.com:acme/widgets.git",
                "reference": "abc123"
            }))
        );
    }

    #[test]
    fn stamp_overwrites_existing_version_in_place() {
        let mut manifest = manifest(json!({
            "name": "acme/widgets",
            "version": "0.1",
            "require": { "php": ">=8.1" }
        }));

        manifest.stamp(&derived("1.0", "1.0.0.0"), None).unwrap();

        let keys: Vec<&str> = manifest.0.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "version", "require", "version_normalized"]);
    }

    #[test]
    fn package_name_requires_string() {
        assert_eq!(
            manifest(json!({ "name": "acme/widgets" })).package_name(),
            Some("acme/widgets")
        );
        assert_eq!(manifest(json!({ "name": 42 })).package_name(), None);
        assert_eq!(manifest(json!({})).package_name(), None);
    }

    #[test]
    fn to_json_uses_indent_and_keeps_html_characters() {
        let manifest = manifest(json!({ "require": { "php": ">=8.1 <9.0 & stuff" } }));

        let rendered = manifest.to_json(4).unwrap();

        assert_eq!(
            rendered,
            "{\n    \"require\": {\n        \"php\": \">=8.1 <9.0 & stuff\"\n    }\n}\n"
        );
    }
}
