use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version string \"{version}\"{}", alias_detail(.version, .hint))]
    UnrecognizedVersionFormat {
        /// The full expression the caller asked about, aliases included
        version: String,
        hint: Option<AliasHint>,
    },
}

impl VersionError {
    pub(crate) fn unrecognized(version: &str, hint: Option<AliasHint>) -> Self {
        Self::UnrecognizedVersionFormat {
            version: version.to_string(),
            hint,
        }
    }

    /// The expression that failed to normalize
    pub fn version(&self) -> &str {
        match self {
            Self::UnrecognizedVersionFormat { version, .. } => version,
        }
    }
}

/// Which half of an `<source> as <target>` alias was malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasHint {
    /// The alias target is not an exact version
    Target,
    /// The alias source is not an exact version nor a `dev-` branch
    Source,
}

impl fmt::Display for AliasHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasHint::Target => f.write_str("the alias must be an exact version"),
            AliasHint::Source => f.write_str(
                "the alias source must be an exact version, if it is a branch name you should prefix it with dev-",
            ),
        }
    }
}

fn alias_detail(version: &str, hint: &Option<AliasHint>) -> String {
    match hint {
        Some(hint) => format!(" in \"{version}\", {hint}"),
        None => String::new(),
    }
}
