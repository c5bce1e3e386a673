//! Unit tests for composite concatenation and flattening

use cyphergen::{concat, concat_optional, BuildConfig, Clause, Match, NodeRef, Pattern};

fn match_on(label: &str) -> (NodeRef, Match) {
    let n = NodeRef::new();
    let m = Match::new(Pattern::node(&n).labeled(label));
    (n, m)
}

#[test]
fn test_concat_is_associative_in_text_and_shape() {
    let (_, a) = match_on("A");
    let (_, b) = match_on("B");
    let (_, c) = match_on("C");
    let nested = concat(&[&concat(&[&a, &b]), &concat(&[&c])]);

    let (_, a2) = match_on("A");
    let (_, b2) = match_on("B");
    let (_, c2) = match_on("C");
    let flat = concat(&[&a2, &b2, &c2]);

    assert_eq!(nested.fragment_count(), flat.fragment_count());
    let config = BuildConfig::default();
    assert_eq!(
        nested.build(&config).unwrap().query,
        flat.build(&config).unwrap().query
    );
}

#[test]
fn test_single_fragment_concat_compiles_like_the_fragment() {
    let (_, a) = match_on("A");
    let wrapped = concat(&[&a]);
    assert_eq!(wrapped.fragment_count(), 1);
    let config = BuildConfig::default();
    assert_eq!(wrapped.build(&config).unwrap().query, "MATCH (n0:A)");
}

#[test]
fn test_empty_and_missing_fragments_vanish() {
    let empty = concat(&[]);
    assert!(empty.is_empty());
    assert_eq!(empty.build(&BuildConfig::default()).unwrap().query, "");

    let (_, a) = match_on("A");
    let joined = concat_optional(&[None, Some(&a), None]);
    assert_eq!(joined.fragment_count(), 1);
    assert_eq!(
        joined.build(&BuildConfig::default()).unwrap().query,
        "MATCH (n0:A)"
    );
}

#[test]
fn test_concat_of_concat_results_never_deepens() {
    let (_, a) = match_on("A");
    let (_, b) = match_on("B");
    let mut combined = concat(&[&a, &b]);
    // Repeated self-concatenation keeps the same direct-child count.
    for _ in 0..3 {
        combined = concat(&[&combined]);
        assert_eq!(combined.fragment_count(), 2);
    }
}
