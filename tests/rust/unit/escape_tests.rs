//! Unit tests for identifier escaping round-trips
//!
//! The inline tests in utils/escape.rs pin the escaping table; these tests
//! check the round-trip property over a wider set of adversarial inputs.

use cyphergen::utils::{escape_identifier, escape_label, escape_relationship_type};

/// Re-lex an escaped identifier under the Cypher identifier rule.
fn relex(escaped: &str) -> String {
    match escaped
        .strip_prefix('`')
        .and_then(|body| body.strip_suffix('`'))
    {
        Some(body) => body.replace("``", "`"),
        None => escaped.to_string(),
    }
}

#[test]
fn test_round_trip_over_adversarial_inputs() {
    let inputs = [
        "plain",
        "_x9",
        "two words",
        "tab\there",
        "new\nline",
        "`",
        "``",
        "```",
        "`leading",
        "trailing`",
        "mid`dle",
        "a``b``c",
        "ünïcødé",
        "日本語",
        "emoji 🎬 title",
        "",
        "back\\slash",
        "dollar$sign",
        "semi;colon",
    ];
    for raw in inputs {
        let escaped = escape_identifier(raw);
        assert_eq!(relex(&escaped), raw, "round trip failed for {:?}", raw);
    }
}

#[test]
fn test_bare_safe_inputs_gain_no_quoting() {
    for raw in ["n", "n0", "Movie", "_hidden", "snake_case", "CamelCase9"] {
        assert_eq!(escape_identifier(raw), raw);
        assert_eq!(escape_label(raw), raw);
        assert_eq!(escape_relationship_type(raw), raw);
    }
}

#[test]
fn test_escaping_safe_output_is_stable() {
    // Idempotence on accepted names: escaping a bare-safe identifier twice
    // changes nothing.
    let once = escape_identifier("stable_name").into_owned();
    let twice = escape_identifier(&once).into_owned();
    assert_eq!(once, twice);
}
