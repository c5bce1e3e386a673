//! End-to-end build scenarios: naming, parameters, configuration and the
//! debug rendering path.

use cyphergen::{
    concat, debug_render, eq, gt, lit, raw_with, BuildConfig, ChainedClause, Clause, CompileError,
    Create, LabelConjunction, Match, NodeRef, Param, Pattern, RelationshipRef, Variable,
};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_match_where_return_order_limit() {
    init_logging();
    let movie = NodeRef::new();
    let clause = Match::new(Pattern::node(&movie).labeled("Movie"))
        .where_(eq(movie.property("released"), Param::new(1999)))
        .returning([(movie.property("title"), "title")])
        .order_by_desc(movie.property("released"))
        .skip(lit(5))
        .limit(lit(10));

    let built = clause.build(&BuildConfig::default()).unwrap();
    assert_eq!(
        built.query,
        "MATCH (n0:Movie)\n\
         WHERE (n0.released = $param0)\n\
         RETURN n0.title AS title\n\
         ORDER BY n0.released DESC\n\
         SKIP 5\n\
         LIMIT 10"
    );
    assert_eq!(built.parameters.len(), 1);
    assert_eq!(built.parameters.get("param0"), Some(&json!(1999)));
}

#[test]
fn test_shared_anonymous_references_across_fragments() {
    // Fragment A defines two anonymous nodes, fragment B reuses the same
    // objects; both fragments must agree on the generated names.
    let a = NodeRef::new();
    let b = NodeRef::new();
    let knows = RelationshipRef::new();

    let define = Create::new(
        Pattern::node(&a)
            .related_to(&knows)
            .of_type("KNOWS")
            .to_node(&b),
    );
    let reuse = Match::new(Pattern::node(&a));
    let _projected = reuse.returning([&a, &b]);

    let built = concat(&[&define, &reuse])
        .build(&BuildConfig::default())
        .unwrap();
    assert_eq!(
        built.query,
        "CREATE (n0)-[r0:KNOWS]->(n1)\nMATCH (n0)\nRETURN n0, n1"
    );
}

#[test]
fn test_building_twice_is_deterministic() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n).labeled("Thing"))
        .where_(gt(n.property("rank"), Param::new(7)));
    let config = BuildConfig::default();
    let first = clause.build(&config).unwrap();
    let second = clause.build(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unused_parameters_are_not_collected() {
    let n = NodeRef::new();
    let _dangling = Param::new("never reaches the text");
    let clause = Match::new(Pattern::node(&n)).returning([&n]);
    let built = clause.build(&BuildConfig::default()).unwrap();
    assert!(built.parameters.is_empty());
}

#[test]
fn test_extra_parameters_override_collected_keys() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n))
        .where_(eq(n.property("x"), Param::new("collected")))
        .returning([&n]);
    let config = BuildConfig {
        extra_parameters: {
            let mut extra = serde_json::Map::new();
            extra.insert("param0".to_string(), json!("caller wins"));
            extra.insert("unrelated".to_string(), json!(1));
            extra
        },
        ..Default::default()
    };
    let built = clause.build(&config).unwrap();
    assert_eq!(built.parameters.get("param0"), Some(&json!("caller wins")));
    assert_eq!(built.parameters.get("unrelated"), Some(&json!(1)));
}

#[test]
fn test_dialect_version_prefixes_a_directive_line() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n)).returning([&n]);
    let config = BuildConfig {
        dialect_version: Some("5".to_string()),
        ..Default::default()
    };
    let built = clause.build(&config).unwrap();
    assert_eq!(built.query, "CYPHER 5\nMATCH (n0)\nRETURN n0");
}

#[test]
fn test_name_prefix_applies_to_names_and_param_keys() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n))
        .where_(eq(n.property("x"), Param::new(1)))
        .returning([&n]);
    let config = BuildConfig {
        name_prefix: Some("my_".to_string()),
        ..Default::default()
    };
    let built = clause.build(&config).unwrap();
    assert_eq!(
        built.query,
        "MATCH (my_n0)\nWHERE (my_n0.x = $my_param0)\nRETURN my_n0"
    );
    assert_eq!(built.parameters.get("my_param0"), Some(&json!(1)));
}

#[test]
fn test_label_conjunction_and_escaping_toggles() {
    let n = NodeRef::new();
    let clause = Match::new(
        Pattern::node(&n)
            .labeled("Old Film")
            .labeled("Classic"),
    )
    .returning([&n]);

    let ampersand = BuildConfig {
        label_conjunction: LabelConjunction::Ampersand,
        ..Default::default()
    };
    assert_eq!(
        clause.build(&ampersand).unwrap().query,
        "MATCH (n0:`Old Film`&Classic)\nRETURN n0"
    );

    let unescaped = BuildConfig {
        disable_label_escaping: true,
        ..Default::default()
    };
    assert_eq!(
        clause.build(&unescaped).unwrap().query,
        "MATCH (n0:Old Film:Classic)\nRETURN n0"
    );
}

#[test]
fn test_named_param_with_unsafe_key_is_escaped_in_text_only() {
    let n = NodeRef::new();
    let p = Param::named("odd key", 42);
    let clause = Match::new(Pattern::node(&n))
        .where_(eq(n.property("x"), &p))
        .returning([&n]);
    let built = clause.build(&BuildConfig::default()).unwrap();
    assert!(built.query.contains("$`odd key`"));
    assert_eq!(built.parameters.get("odd key"), Some(&json!(42)));
}

#[test]
fn test_custom_fragment_errors_propagate_on_the_build_path() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n))
        .where_(raw_with(|_env| Err(CompileError::custom("user hook failed"))));
    let err = clause.build(&BuildConfig::default()).unwrap_err();
    assert!(matches!(err, CompileError::CustomFragment(_)));
}

#[test]
fn test_debug_render_substitutes_error_markers() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n))
        .where_(raw_with(|_env| Err(CompileError::custom("user hook failed"))));
    let rendered = debug_render(&clause);
    assert!(rendered.starts_with("MATCH (n0)"));
    assert!(rendered.contains("<compile error: custom fragment failed: user hook failed>"));
}

#[test]
fn test_debug_render_matches_build_for_well_formed_trees() {
    let n = NodeRef::new();
    let clause = Match::new(Pattern::node(&n).labeled("Movie")).returning([&n]);
    let built = clause.build(&BuildConfig::default()).unwrap();
    assert_eq!(debug_render(&clause), built.query);
}

#[test]
fn test_build_from_any_chain_member_reaches_the_root() {
    let n = NodeRef::new();
    let head = Match::new(Pattern::node(&n));
    let tail = head.returning([&n]);
    let from_tail = tail.build(&BuildConfig::default()).unwrap();
    let from_head = head.build(&BuildConfig::default()).unwrap();
    assert_eq!(from_tail, from_head);
    assert_eq!(from_tail.query, "MATCH (n0)\nRETURN n0");
}

#[test]
fn test_raw_clause_callback_reaches_the_shared_environment() {
    let n = NodeRef::new();
    let limit = Param::new(25);
    let head = Match::new(Pattern::node(&n));
    let _tail = head.returning([&n]).raw_clause("// trailer");
    let clause = concat(&[&head, &cyphergen::RawClause::with(move |env| {
        Ok(format!("LIMIT ${}", env.key_for(&limit)))
    })]);
    let built = clause.build(&BuildConfig::default()).unwrap();
    assert_eq!(
        built.query,
        "MATCH (n0)\nRETURN n0\n// trailer\nLIMIT $param0"
    );
    assert_eq!(built.parameters.get("param0"), Some(&json!(25)));
}

#[test]
fn test_unused_variable_objects_never_consume_counters() {
    // Creating references has no effect on a build they never reach.
    let _noise: Vec<Variable> = (0..10).map(|_| Variable::new()).collect();
    let n = NodeRef::new();
    let built = Match::new(Pattern::node(&n))
        .returning([&n])
        .build(&BuildConfig::default())
        .unwrap();
    assert_eq!(built.query, "MATCH (n0)\nRETURN n0");
}
