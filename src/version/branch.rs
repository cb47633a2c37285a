//! Branch name normalization
//!
//! Branches come in three shapes:
//! - `master`, `trunk` and `default` map to the `9999999-dev` sentinel
//! - numeric branches (`1.x`, `v2.4`, `3.*`) become four-component dev
//!   versions with wildcards resolved to `9999999`
//! - anything else is an arbitrary branch kept verbatim as `dev-<name>`

use crate::version::patterns::{MASTER_ALIAS, NUMERIC_BRANCH, WILDCARD_NUMERAL};

const MASTER_LIKE_BRANCHES: [&str; 3] = ["master", "trunk", "default"];

/// Classification of a branch name, see [`normalize_branch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BranchVersion {
    Master,
    /// Normalized numeric branch such as `1.2.9999999.9999999-dev`
    Numeric(String),
    /// Arbitrary branch, normalized as `dev-<name>`
    Named(String),
}

impl BranchVersion {
    pub(crate) fn classify(name: &str) -> Self {
        let name = name.trim();

        if MASTER_LIKE_BRANCHES.contains(&name) {
            return BranchVersion::Master;
        }

        let Some(captures) = NUMERIC_BRANCH.captures(name) else {
            return BranchVersion::Named(name.to_string());
        };

        let version: String = (1..=4)
            .map(|i| match captures.get(i) {
                Some(part) => part.as_str().replace(['*', 'X'], "x"),
                None => ".x".to_string(),
            })
            .collect();

        BranchVersion::Numeric(format!("{}-dev", version.replace('x', WILDCARD_NUMERAL)))
    }

    pub(crate) fn into_normalized(self) -> String {
        match self {
            BranchVersion::Master => MASTER_ALIAS.to_string(),
            BranchVersion::Numeric(version) => version,
            BranchVersion::Named(name) => format!("dev-{name}"),
        }
    }
}

/// Normalize a branch name to a Composer dev version.
///
/// Never fails: names that do not look numeric fall back to `dev-<name>`.
///
/// # Example
///
/// ```
/// use composer_version::version::normalize_branch;
///
/// assert_eq!(normalize_branch("v1.x"), "1.9999999.9999999.9999999-dev");
/// assert_eq!(normalize_branch("feature-a"), "dev-feature-a");
/// ```
pub fn normalize_branch(name: &str) -> String {
    BranchVersion::classify(name).into_normalized()
}
