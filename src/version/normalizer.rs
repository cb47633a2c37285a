//! Composer version normalization
//!
//! Turns any version expression Composer accepts into its canonical,
//! sortable form:
//! - `1.0` -> `1.0.0.0`
//! - `v2.1.3-rc1` -> `2.1.3.0-RC1`
//! - `2010-01-02` -> `2010.01.02`
//! - `dev-master` -> `9999999-dev`
//! - `1.x-dev` -> `1.9999999.9999999.9999999-dev`

use tracing::debug;

use crate::version::branch::normalize_branch;
use crate::version::error::{AliasHint, VersionError};
use crate::version::patterns::{
    ALIAS, BUILD_METADATA, CLASSICAL, DATE, DEV_SUFFIX, MASTER_ALIAS, MASTER_LIKE, NON_DIGIT,
};
use crate::version::stability::Modifier;

/// Normalize a version expression.
///
/// `full_version` is only used in error messages; pass an empty string to
/// report `version` itself.
///
/// # Example
///
/// ```
/// use composer_version::version::normalise_version;
///
/// assert_eq!(normalise_version("1.0.0RC1dev", "").unwrap(), "1.0.0.0-RC1-dev");
/// assert_eq!(normalise_version("2010-01-02", "").unwrap(), "2010.01.02");
/// assert!(normalise_version("1.0.1-SNAPSHOT", "").is_err());
/// ```
pub fn normalise_version(version: &str, full_version: &str) -> Result<String, VersionError> {
    let mut version = version.trim();
    let full_version = if full_version.is_empty() {
        version
    } else {
        full_version
    };

    // Aliases normalize to their source
    if let Some(source) = ALIAS.captures(version).and_then(|c| c.name("source")) {
        version = source.as_str();
    }

    if MASTER_LIKE.is_match(version) {
        return Ok(MASTER_ALIAS.to_string());
    }

    if let Some(branch) = strip_dev_prefix(version) {
        return Ok(format!("dev-{branch}"));
    }

    if let Some(stripped) = BUILD_METADATA.captures(version).and_then(|c| c.name("version")) {
        version = stripped.as_str();
    }

    if let Some(captures) = CLASSICAL.captures(version) {
        let mut core = captures["major"].to_string();
        for component in ["minor", "patch", "build"] {
            core.push_str(captures.name(component).map_or(".0", |m| m.as_str()));
        }
        return Ok(Modifier::from_captures(&captures).apply(core));
    }

    if let Some(captures) = DATE.captures(version) {
        let core = NON_DIGIT.replace_all(&captures["date"], ".").into_owned();
        return Ok(Modifier::from_captures(&captures).apply(core));
    }

    if let Some(branch) = DEV_SUFFIX.captures(version).and_then(|c| c.name("branch")) {
        return Ok(normalize_branch(branch.as_str()));
    }

    debug!("No version shape matches '{}'", version);
    Err(VersionError::unrecognized(
        full_version,
        alias_hint(version, full_version),
    ))
}

/// `dev-<branch>` in any case, with a non-empty branch
fn strip_dev_prefix(version: &str) -> Option<&str> {
    let prefix = version.get(..4)?;
    let branch = &version[4..];

    (prefix.eq_ignore_ascii_case("dev-") && !branch.is_empty()).then_some(branch)
}

/// Find out which side of an alias expression failed to normalize
fn alias_hint(version: &str, full_version: &str) -> Option<AliasHint> {
    let captures = ALIAS.captures(full_version)?;

    if &captures["target"] == version {
        Some(AliasHint::Target)
    } else if &captures["source"] == version {
        Some(AliasHint::Source)
    } else {
        None
    }
}
