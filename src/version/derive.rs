//! Version derivation from git references
//!
//! Tags are taken as written (minus any `release-` marker). Branches become
//! dev versions: numeric branches turn into `N.x-dev` aliases, everything else
//! into `dev-<branch>`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::version::branch::BranchVersion;
use crate::version::error::VersionError;
use crate::version::normalizer::normalise_version;
use crate::version::patterns::WILDCARD_RUN;

const RELEASE_MARKER: &str = "release-";
const REMOTE_PREFIX: &str = "origin/";
const DEV_PREFIX: &str = "dev-";

/// Tunables of [`derive_version`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeriveOptions {
    /// Collapse wildcard components of numeric branches into a single `.x`
    /// (`1.9999999.9999999.9999999-dev` is displayed as `1.x-dev`)
    pub collapse_wildcards: bool,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            collapse_wildcards: true,
        }
    }
}

/// Display and normalized version of a git reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedVersion {
    /// Human readable version, e.g. `5.0.x-dev` or `dev-feature/foo`
    pub version: String,
    /// Normalized, sortable version, e.g. `5.0.9999999.9999999-dev`
    pub normalized: String,
}

/// Derive the Composer version of a tag or branch.
///
/// # Example
///
/// ```
/// use composer_version::version::{DeriveOptions, derive_version};
///
/// let derived = derive_version("release-5.0", false, DeriveOptions::default()).unwrap();
/// assert_eq!(derived.version, "5.0");
/// assert_eq!(derived.normalized, "5.0.0.0");
///
/// let derived = derive_version("origin/master", true, DeriveOptions::default()).unwrap();
/// assert_eq!(derived.version, "dev-master");
/// assert_eq!(derived.normalized, "9999999-dev");
/// ```
pub fn derive_version(
    name: &str,
    is_branch: bool,
    options: DeriveOptions,
) -> Result<DerivedVersion, VersionError> {
    let version = if is_branch {
        branch_version(name, options)
    } else {
        name.replace(RELEASE_MARKER, "")
    };

    let normalized = normalise_version(&version, "")?;
    debug!(
        "Derived '{}' ({}) from {} '{}'",
        version,
        normalized,
        if is_branch { "branch" } else { "tag" },
        name
    );

    Ok(DerivedVersion {
        version,
        normalized,
    })
}

fn branch_version(name: &str, options: DeriveOptions) -> String {
    let raw_branch = name.strip_prefix(REMOTE_PREFIX).unwrap_or(name);

    match BranchVersion::classify(raw_branch) {
        BranchVersion::Numeric(normalized) => {
            let prefix = if raw_branch.starts_with('v') { "v" } else { "" };
            let version = if options.collapse_wildcards {
                WILDCARD_RUN.replace_all(&normalized, ".x").into_owned()
            } else {
                normalized
            };
            format!("{prefix}{version}")
        }
        BranchVersion::Master | BranchVersion::Named(_) => {
            if raw_branch.len() > DEV_PREFIX.len() && raw_branch.starts_with(DEV_PREFIX) {
                raw_branch.to_string()
            } else {
                format!("{DEV_PREFIX}{raw_branch}")
            }
        }
    }
}
