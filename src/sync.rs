//! Batch derivation over git references
//!
//! A repository sync derives one version per tag and branch. References that
//! do not map to a Composer version are skipped and reported, they never
//! abort the batch.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::version::{DeriveOptions, DerivedVersion, VersionError, derive_version};

const TAGS_PREFIX: &str = "refs/tags/";
const HEADS_PREFIX: &str = "refs/heads/";
const REMOTES_PREFIX: &str = "refs/remotes/";
const REFS_PREFIX: &str = "refs/";
const SYMBOLIC_HEAD: &str = "HEAD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    Tag,
    Branch,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Tag => "tag",
            RefKind::Branch => "branch",
        }
    }
}

/// A tag or branch of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitRef {
    /// Short name, e.g. `v1.0.0`, `develop` or `origin/develop`
    pub name: String,
    pub kind: RefKind,
}

impl GitRef {
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RefKind::Tag,
        }
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RefKind::Branch,
        }
    }

    pub fn is_branch(&self) -> bool {
        self.kind == RefKind::Branch
    }

    /// Derive the Composer version of this reference
    pub fn derive(&self, options: DeriveOptions) -> Result<DerivedVersion, VersionError> {
        derive_version(&self.name, self.is_branch(), options)
    }
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind.as_str(), self.name)
    }
}

impl GitRef {
    /// Parse a full reference name.
    ///
    /// Well-formed references that are neither tags nor branches, such as
    /// `refs/stash`, `refs/notes/*` or a remote's symbolic `HEAD`, give
    /// `Ok(None)`. Anything that is not a reference name is an error.
    pub fn parse_ref_name(s: &str) -> Result<Option<Self>, SourceError> {
        let s = s.trim();

        let git_ref = if let Some(name) = s.strip_prefix(TAGS_PREFIX) {
            GitRef::tag(name)
        } else if let Some(name) = s.strip_prefix(HEADS_PREFIX) {
            GitRef::branch(name)
        } else if let Some(name) = s.strip_prefix(REMOTES_PREFIX) {
            if name
                .split_once('/')
                .is_some_and(|(_, branch)| branch == SYMBOLIC_HEAD)
            {
                return Ok(None);
            }
            GitRef::branch(name)
        } else if s.len() > REFS_PREFIX.len() && s.starts_with(REFS_PREFIX) {
            return Ok(None);
        } else {
            return Err(SourceError::InvalidRef(s.to_string()));
        };

        if git_ref.name.is_empty() {
            return Err(SourceError::InvalidRef(s.to_string()));
        }

        Ok(Some(git_ref))
    }
}

/// Parses full reference names:
/// - `refs/tags/<name>` -> tag `<name>`
/// - `refs/heads/<name>` -> branch `<name>`
/// - `refs/remotes/<remote>/<name>` -> branch `<remote>/<name>`
///
/// Every other reference is rejected.
impl FromStr for GitRef {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_ref_name(s)?.ok_or_else(|| SourceError::InvalidRef(s.trim().to_string()))
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Not a tag or branch reference: '{0}'")]
    InvalidRef(String),

    #[error("Failed to read references: {0}")]
    Io(#[from] std::io::Error),
}

/// Lists the references of a repository
#[cfg_attr(test, automock)]
pub trait RefSource {
    fn references(&self) -> Result<Vec<GitRef>, SourceError>;
}

/// References read from text, one full reference name per line, as printed
/// by `git for-each-ref --format='%(refname)'`. References other than tags
/// and branches are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineRefSource {
    refs: Vec<GitRef>,
}

impl LineRefSource {
    /// Parse every non-blank line of `reader`
    pub fn read<R: BufRead>(reader: R) -> Result<Self, SourceError> {
        let mut refs: Vec<GitRef> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match GitRef::parse_ref_name(line)? {
                Some(git_ref) => refs.push(git_ref),
                None => warn!("Ignoring reference '{}': not a tag or branch", line),
            }
        }

        Ok(Self { refs })
    }
}

impl RefSource for LineRefSource {
    fn references(&self) -> Result<Vec<GitRef>, SourceError> {
        Ok(self.refs.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedRef {
    #[serde(rename = "ref")]
    pub git_ref: GitRef,
    #[serde(flatten)]
    pub derived: DerivedVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRef {
    #[serde(rename = "ref")]
    pub git_ref: GitRef,
    pub reason: String,
}

/// Outcome of a batch derivation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub derived: Vec<DerivedRef>,
    pub skipped: Vec<SkippedRef>,
}

/// Derive versions for every reference, tags first.
///
/// References keep their relative order within each kind. Failures are
/// logged and collected in [`SyncReport::skipped`].
pub fn derive_all(refs: &[GitRef], options: DeriveOptions) -> SyncReport {
    let mut report = SyncReport::default();

    let tags = refs.iter().filter(|r| !r.is_branch());
    let branches = refs.iter().filter(|r| r.is_branch());

    for git_ref in tags.chain(branches) {
        match git_ref.derive(options) {
            Ok(derived) => {
                debug!("{} -> {}", git_ref, derived.version);
                report.derived.push(DerivedRef {
                    git_ref: git_ref.clone(),
                    derived,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", git_ref, e);
                report.skipped.push(SkippedRef {
                    git_ref: git_ref.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Derived {} versions, skipped {} references",
        report.derived.len(),
        report.skipped.len()
    );

    report
}

/// List the references of `source` and derive all of them
pub fn sync_source<S: RefSource + ?Sized>(
    source: &S,
    options: DeriveOptions,
) -> Result<SyncReport, SourceError> {
    let refs = source.references()?;
    Ok(derive_all(&refs, options))
}
