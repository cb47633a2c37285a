//! Stability modifiers of the Composer version grammar
//!
//! A version core may be followed by a modifier such as `-beta2`, `RC1dev`,
//! `.pl3-dev` or `-dev`. The modifier is parsed once into a [`Modifier`] and
//! then rendered onto the normalized core.

use regex::Captures;

/// Expand a shorthand stability token to its canonical name.
///
/// - `a` -> `alpha`
/// - `b` -> `beta`
/// - `p`, `pl` -> `patch`
/// - `rc` -> `RC`
///
/// Any other token is returned lower-cased.
pub fn expand_stability(stability: &str) -> String {
    let stability = stability.to_ascii_lowercase();

    match stability.as_str() {
        "a" => "alpha".to_string(),
        "b" => "beta".to_string(),
        "p" | "pl" => "patch".to_string(),
        "rc" => "RC".to_string(),
        _ => stability,
    }
}

/// Parsed modifier suffix of a classical or date based version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// Nothing follows the version core
    None,
    /// An explicit `stable` marker, which suppresses every other suffix
    Stable,
    /// A pre-release stability with optional numbering
    Stability {
        /// Canonical stability name, see [`expand_stability`]
        name: String,
        /// Numbering with leading separators removed, e.g. `2.1-3`
        digits: String,
        dev: bool,
    },
    /// Only a trailing `dev` marker
    DevOnly,
}

impl Modifier {
    /// Build a modifier from a match of one of the version shape patterns.
    ///
    /// The captures must come from a pattern embedding the shared modifier
    /// grammar (named groups `stability`, `digits` and `dev`).
    pub(crate) fn from_captures(captures: &Captures<'_>) -> Self {
        let dev = captures.name("dev").is_some_and(|m| !m.is_empty());

        match captures.name("stability").map(|m| m.as_str()) {
            Some(stability) if stability.eq_ignore_ascii_case("stable") => Modifier::Stable,
            Some(stability) if !stability.is_empty() => Modifier::Stability {
                name: expand_stability(stability),
                digits: captures
                    .name("digits")
                    .map(|m| m.as_str().trim_start_matches(['.', '-']).to_string())
                    .unwrap_or_default(),
                dev,
            },
            _ if dev => Modifier::DevOnly,
            _ => Modifier::None,
        }
    }

    /// Append this modifier to a normalized version core
    pub fn apply(&self, core: String) -> String {
        match self {
            Modifier::None | Modifier::Stable => core,
            Modifier::DevOnly => core + "-dev",
            Modifier::Stability { name, digits, dev } => {
                let mut version = format!("{core}-{name}{digits}");
                if *dev {
                    version.push_str("-dev");
                }
                version
            }
        }
    }
}
