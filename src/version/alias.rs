use crate::version::patterns::NUMERIC_ALIAS;

/// Extract the numeric prefix of a normalized dev branch alias.
///
/// Returns the leading dotted digits followed by a `.`, or an empty string
/// when the branch is not a numeric alias.
///
/// # Example
///
/// ```
/// use composer_version::version::parse_numeric_alias_prefix;
///
/// assert_eq!(parse_numeric_alias_prefix("1.2.x-dev"), "1.2.");
/// assert_eq!(parse_numeric_alias_prefix("dev-master"), "");
/// ```
pub fn parse_numeric_alias_prefix(branch: &str) -> String {
    NUMERIC_ALIAS
        .captures(branch)
        .and_then(|c| c.name("prefix"))
        .map(|prefix| format!("{}.", prefix.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.x-dev", "0.")]
    #[case("1.0.x-dev", "1.0.")]
    #[case("1.x-dev", "1.")]
    #[case("1.2.x-dev", "1.2.")]
    #[case("1.2.X-DEV", "1.2.")]
    #[case("1.2-dev", "1.2.")]
    #[case("1-dev", "1.")]
    #[case("dev-develop", "")]
    #[case("dev-master", "")]
    #[case("1.2.x", "")]
    fn parse_numeric_alias_prefix_returns_expected(#[case] branch: &str, #[case] expected: &str) {
        assert_eq!(parse_numeric_alias_prefix(branch), expected);
    }
}
