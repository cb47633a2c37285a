//! Compiled patterns of the Composer version grammar
//!
//! Every pattern is compiled on first use and shared process-wide. They hold
//! no state beyond the compiled automaton, so concurrent callers need no
//! locking.

use std::sync::LazyLock;

use regex::Regex;

/// The normalized form of `master`, `trunk` and `default`
pub const MASTER_ALIAS: &str = "9999999-dev";

/// Numeral standing in for a wildcard version component
pub const WILDCARD_NUMERAL: &str = "9999999";

/// Pre-release modifier following a version core.
///
/// A hyphen, underscore, dot or nothing at all may separate it from the core.
/// Only stabilities Composer knows may precede a numeric identifier.
const MODIFIER: &str = r"[._-]?(?:(?P<stability>stable|beta|b|RC|alpha|a|patch|pl|p)(?P<digits>(?:[.-]?[0-9]+)*)?)?(?P<dev>[.-]?dev)?";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid version pattern {pattern:?}: {e}"))
}

/// `<source> as <target>`
pub(crate) static ALIAS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<source>[^,\s]+) +as +(?P<target>[^,\s]+)$"));

pub(crate) static MASTER_LIKE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:dev-)?(?:master|trunk|default)$"));

/// Everything before a `+build` metadata suffix
pub(crate) static BUILD_METADATA: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<version>[^,\s+]+)\+[^\s]+$"));

/// `major[.minor[.patch[.build]]]` followed by a modifier
pub(crate) static CLASSICAL: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^v?(?P<major>[0-9]{{1,5}})(?P<minor>\.[0-9]+)?(?P<patch>\.[0-9]+)?(?P<build>\.[0-9]+)?{MODIFIER}$"
    ))
});

/// Date or datetime run such as `2010-01-02` or `20100102-203040`
pub(crate) static DATE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^v?(?P<date>[0-9]{{4}}(?:[.:-]?[0-9]{{2}}){{1,6}}(?:[.:-]?[0-9]{{1,3}})?){MODIFIER}$"
    ))
});

pub(crate) static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| compile(r"[^0-9]"));

/// A version that only carries a trailing `dev` marker
pub(crate) static DEV_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(?P<branch>.*?)[.-]?dev$"));

/// Numeric branch with up to four components, each a number or a wildcard
pub(crate) static NUMERIC_BRANCH: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^v?([0-9]+)(\.(?:[0-9]+|[xX*]))?(\.(?:[0-9]+|[xX*]))?(\.(?:[0-9]+|[xX*]))?$")
});

/// One or more consecutive wildcard components of a normalized branch
pub(crate) static WILDCARD_RUN: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?:\.{WILDCARD_NUMERAL})+\b")));

pub(crate) static NUMERIC_ALIAS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?P<prefix>(?:[0-9]+\.)*[0-9]+)(?:\.x)?-dev$"));
