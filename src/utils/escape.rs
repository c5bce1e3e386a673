//! Centralized identifier escaping to ensure every emitted name survives the
//! Cypher lexer unchanged.
//!
//! All identifier quoting MUST go through these functions. Variable names,
//! property keys, labels and relationship types each pass through here exactly
//! once, at the point where they are rendered into query text.
//!
//! ## Escaping rule
//! A bare-safe identifier (letter or underscore, then letters, digits or
//! underscores) is returned unchanged. Anything else has every literal
//! backtick doubled and the whole result wrapped in backticks, which is the
//! only quoting form the Cypher lexer recognizes for identifiers.
//!
//! Examples:
//! - `movie` → `movie` (unchanged)
//! - `movie title` → `` `movie title` ``
//! - `the`hood` → `` `the``hood` ``

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref BARE_SAFE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Escape a generic identifier (variable name, property key, alias).
///
/// Bare-safe input is returned borrowed and unchanged, so the function is
/// idempotent on names it has already accepted. Quoted output doubles every
/// literal backtick, so the escaped form re-lexes to exactly the input.
///
/// ```
/// use cyphergen::utils::escape_identifier;
///
/// assert_eq!(escape_identifier("movie"), "movie");
/// assert_eq!(escape_identifier("movie title"), "`movie title`");
/// assert_eq!(escape_identifier("the`hood"), "`the``hood`");
/// ```
pub fn escape_identifier(raw: &str) -> Cow<'_, str> {
    if BARE_SAFE.is_match(raw) {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("`{}`", raw.replace('`', "``")))
    }
}

/// Escape a node label token.
///
/// Same algorithm as [`escape_identifier`]; a separate entry point so label
/// escaping can be switched off independently by build configuration.
pub fn escape_label(raw: &str) -> Cow<'_, str> {
    escape_identifier(raw)
}

/// Escape a relationship type token.
pub fn escape_relationship_type(raw: &str) -> Cow<'_, str> {
    escape_identifier(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("movie", "movie" ; "bare safe unchanged")]
    #[test_case("_private", "_private" ; "leading underscore is safe")]
    #[test_case("n0", "n0" ; "trailing digits are safe")]
    #[test_case("movie title", "`movie title`" ; "space forces quoting")]
    #[test_case("0start", "`0start`" ; "leading digit forces quoting")]
    #[test_case("", "``" ; "empty string is quoted")]
    #[test_case("the`hood", "`the``hood`" ; "single backtick doubled")]
    #[test_case("a``b", "`a````b`" ; "consecutive backticks each doubled")]
    #[test_case("`", "````" ; "lone backtick")]
    #[test_case("grüße", "`grüße`" ; "non ascii is quoted")]
    #[test_case("a-b", "`a-b`" ; "dash forces quoting")]
    #[test_case(r"\u0060", "`\\u0060`" ; "backslash escape sequence passes through untouched")]
    fn test_escape_identifier(raw: &str, expected: &str) {
        assert_eq!(escape_identifier(raw), expected);
    }

    /// Re-lex the escaped form under the Cypher identifier rule and check it
    /// yields back the input exactly.
    fn unlex(escaped: &str) -> String {
        if let Some(body) = escaped
            .strip_prefix('`')
            .and_then(|s| s.strip_suffix('`'))
        {
            body.replace("``", "`")
        } else {
            escaped.to_string()
        }
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "movie",
            "movie title",
            "the`hood",
            "``",
            "a```b",
            "grüße",
            "",
            "ends with`",
            "`starts with",
        ];
        for raw in inputs {
            let escaped = escape_identifier(raw);
            assert_eq!(unlex(&escaped), raw, "round trip failed for {:?}", raw);
        }
    }

    #[test]
    fn test_idempotent_on_safe_names() {
        let once = escape_identifier("already_safe");
        let twice = escape_identifier(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_label_and_type_share_the_rule() {
        assert_eq!(escape_label("Has Account"), "`Has Account`");
        assert_eq!(escape_relationship_type("ACTED_IN"), "ACTED_IN");
    }
}
