//! Unit tests for environment naming and parameter key assignment

use cyphergen::{BuildConfig, CompileEnv, NodeRef, Param, RelationshipRef, Variable};
use serde_json::json;

fn env() -> CompileEnv {
    CompileEnv::new(&BuildConfig::default())
}

#[test]
fn test_repeated_lookups_return_the_identical_string() {
    let mut env = env();
    let v = Variable::new();
    let name = env.name_for(&v);
    for _ in 0..5 {
        assert_eq!(env.name_for(&v), name);
    }
}

#[test]
fn test_no_collision_across_categories_sharing_prefix_space() {
    // A named variable squats on "n0"; the first anonymous node must skip it
    // even though the name came from a different category.
    let mut env = env();
    assert_eq!(env.name_for(&Variable::named("n0")), "n0");
    assert_eq!(env.name_for(&NodeRef::new()), "n1");
}

#[test]
fn test_fresh_environments_restart_counters() {
    let names: Vec<String> = (0..2)
        .map(|_| {
            let mut env = env();
            let a = NodeRef::new();
            let b = RelationshipRef::new();
            format!("{} {}", env.name_for(&a), env.name_for(&b))
        })
        .collect();
    assert_eq!(names[0], "n0 r0");
    assert_eq!(names[0], names[1]);
}

#[test]
fn test_encounter_order_decides_names_not_creation_order() {
    let mut env = env();
    let first_created = NodeRef::new();
    let second_created = NodeRef::new();
    // Compiled in reverse creation order.
    assert_eq!(env.name_for(&second_created), "n0");
    assert_eq!(env.name_for(&first_created), "n1");
}

#[test]
fn test_anonymous_param_keys_and_values() {
    let mut env = env();
    let p = Param::new(json!({"nested": [1, 2]}));
    assert_eq!(env.key_for(&p), "param0");
    let params = env.collect_parameters();
    assert_eq!(params.get("param0"), Some(&json!({"nested": [1, 2]})));
}

#[test]
fn test_named_param_key_collision_is_skipped_by_the_counter() {
    let mut env = env();
    env.key_for(&Param::named("param1", "taken"));
    assert_eq!(env.key_for(&Param::new("a")), "param0");
    // "param1" is occupied by the named key; the counter consumes it and
    // moves on.
    assert_eq!(env.key_for(&Param::new("b")), "param2");
}
