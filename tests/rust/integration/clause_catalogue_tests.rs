//! Golden-text tests for the clause catalogue.

use cyphergen::{
    count_star, eq, exists, gt, lit, BuildConfig, Call, ChainedClause, Clause, CompileError,
    Create, Expr, Foreach, Match, Merge, NodeRef, Param, Pattern, PathVariable, RelationshipRef,
    Remove, Set, Union, Unwind, Variable,
};
use serde_json::json;

fn build(clause: &impl Clause) -> String {
    clause.build(&BuildConfig::default()).unwrap().query
}

#[test]
fn test_optional_match_chain() {
    let person = NodeRef::new();
    let movie = NodeRef::new();
    let acted = RelationshipRef::new();
    let head = Match::new(Pattern::node(&person).labeled("Person"));
    let _tail = head
        .optional_match(
            Pattern::node(&person)
                .related_to(&acted)
                .of_type("ACTED_IN")
                .to_node(&movie),
        )
        .returning([&person, &movie]);
    assert_eq!(
        build(&head),
        "MATCH (n0:Person)\n\
         OPTIONAL MATCH (n0)-[r0:ACTED_IN]->(n1)\n\
         RETURN n0, n1"
    );
}

#[test]
fn test_create_with_properties() {
    let person = NodeRef::new();
    let clause = Create::new(
        Pattern::node(&person)
            .labeled("Person")
            .with_property("name", Param::new("Keanu"))
            .with_property("born", lit(1964)),
    )
    .returning([&person]);
    let built = clause.build(&BuildConfig::default()).unwrap();
    assert_eq!(
        built.query,
        "CREATE (n0:Person {name: $param0, born: 1964})\nRETURN n0"
    );
    assert_eq!(built.parameters.get("param0"), Some(&json!("Keanu")));
}

#[test]
fn test_merge_with_on_create_and_on_match() {
    let person = NodeRef::new();
    let clause = Merge::new(
        Pattern::node(&person)
            .labeled("Person")
            .with_property("name", Param::new("Keanu")),
    )
    .on_create_set(person.property("created"), lit(true))
    .on_match_set(person.property("seen"), lit(true));
    let _tail = clause.returning([&person]);
    assert_eq!(
        build(&clause),
        "MERGE (n0:Person {name: $param0})\n\
         ON CREATE SET n0.created = true\n\
         ON MATCH SET n0.seen = true\n\
         RETURN n0"
    );
}

#[test]
fn test_unwind_feeds_later_clauses() {
    let x = Variable::new();
    let clause = Unwind::new(Param::new(json!([1, 2, 3])), &x);
    let _tail = clause.returning([&x]);
    let built = clause.build(&BuildConfig::default()).unwrap();
    assert_eq!(built.query, "UNWIND $param0 AS var0\nRETURN var0");
    assert_eq!(built.parameters.get("param0"), Some(&json!([1, 2, 3])));
}

#[test]
fn test_with_aggregation_and_filter() {
    let person = NodeRef::new();
    let cnt = Variable::named("cnt");
    let head = Match::new(Pattern::node(&person).labeled("Person"));
    let _tail = head
        .with_([(count_star(), "cnt")])
        .where_(gt(&cnt, lit(1)))
        .returning([&cnt]);
    assert_eq!(
        build(&head),
        "MATCH (n0:Person)\n\
         WITH count(*) AS cnt\n\
         WHERE (cnt > 1)\n\
         RETURN cnt"
    );
}

#[test]
fn test_set_and_remove_mutations() {
    let n = NodeRef::new();
    let head = Match::new(Pattern::node(&n).labeled("Draft"));
    let _tail = head
        .set(n.property("reviewed"), lit(true))
        .and_label(&n, ["Archived"]);
    assert_eq!(
        build(&head),
        "MATCH (n0:Draft)\nSET n0.reviewed = true, n0:Archived"
    );

    let m = NodeRef::new();
    let head = Match::new(Pattern::node(&m));
    let _tail: Remove = head.remove(m.property("stale"));
    assert_eq!(build(&head), "MATCH (n0)\nREMOVE n0.stale");
}

#[test]
fn test_delete_and_detach_delete() {
    let n = NodeRef::new();
    let head = Match::new(Pattern::node(&n));
    let _tail = head.detach_delete([&n]);
    assert_eq!(build(&head), "MATCH (n0)\nDETACH DELETE n0");
}

#[test]
fn test_call_procedure_with_yield() {
    let label = Variable::named("label");
    let clause = Call::procedure("db.labels").yielding(["label"]);
    let _tail = clause.returning([&label]);
    assert_eq!(build(&clause), "CALL db.labels() YIELD label\nRETURN label");
}

#[test]
fn test_call_subquery_shares_the_environment() {
    let outer = NodeRef::new();
    let inner = NodeRef::new();
    let cnt = Variable::named("cnt");
    let inner_head = Match::new(Pattern::node(&inner).labeled("Movie"));
    let _inner_tail = inner_head.returning([(count_star(), "cnt")]);

    let head = Match::new(Pattern::node(&outer).labeled("Person"));
    let _tail = head
        .call_subquery(&inner_head)
        .returning([Expr::from(&outer), Expr::from(&cnt)]);
    assert_eq!(
        build(&head),
        "MATCH (n0:Person)\n\
         CALL {\n\
         MATCH (n1:Movie)\n\
         RETURN count(*) AS cnt\n\
         }\n\
         RETURN n0, cnt"
    );
}

#[test]
fn test_union_and_union_all() {
    let a = NodeRef::new();
    let left = Match::new(Pattern::node(&a).labeled("Movie"));
    let _l = left.returning([(&a, "item")]);
    let b = NodeRef::new();
    let right = Match::new(Pattern::node(&b).labeled("Series"));
    let _r = right.returning([(&b, "item")]);

    let union = Union::new(&[&left, &right]);
    assert_eq!(
        build(&union),
        "MATCH (n0:Movie)\n\
         RETURN n0 AS item\n\
         UNION\n\
         MATCH (n1:Series)\n\
         RETURN n1 AS item"
    );
}

#[test]
fn test_union_requires_two_queries() {
    let a = NodeRef::new();
    let only = Match::new(Pattern::node(&a));
    let union = Union::all(&[&only]);
    assert!(matches!(
        union.build(&BuildConfig::default()),
        Err(CompileError::UnionTooFewQueries(1))
    ));
}

#[test]
fn test_foreach_requires_update_clauses() {
    let x = Variable::new();
    let empty = Foreach::new(&x, Param::new(json!([1, 2])));
    assert!(matches!(
        empty.build(&BuildConfig::default()),
        Err(CompileError::EmptyForeachBody)
    ));

    let x = Variable::new();
    let filled = Foreach::new(&x, Param::new(json!([1, 2])))
        .mutate(&Set::new(x.property("done"), lit(true)));
    assert_eq!(
        build(&filled),
        "FOREACH (var0 IN $param0 | SET var0.done = true)"
    );
}

#[test]
fn test_exists_predicate_over_a_pattern() {
    let person = NodeRef::new();
    let other = NodeRef::new();
    let knows = RelationshipRef::new();
    let head = Match::new(Pattern::node(&person).labeled("Person")).where_(exists(
        Pattern::node(&person)
            .related_to(&knows)
            .of_type("KNOWS")
            .to_node(&other),
    ));
    let _tail = head.returning([&person]);
    assert_eq!(
        build(&head),
        "MATCH (n0:Person)\n\
         WHERE EXISTS { (n0)-[r0:KNOWS]->(n1) }\n\
         RETURN n0"
    );
}

#[test]
fn test_path_variable_binding_and_projection() {
    let p = PathVariable::new();
    let a = NodeRef::new();
    let b = NodeRef::new();
    let r = RelationshipRef::new();
    let head = Match::new(
        Pattern::node(&a)
            .related_to(&r)
            .of_type("KNOWS")
            .length_between(Some(1), Some(3))
            .to_node(&b)
            .assign_to(&p),
    );
    let _tail = head.returning([&p]);
    assert_eq!(
        build(&head),
        "MATCH p0 = (n0)-[r0:KNOWS*1..3]->(n1)\nRETURN p0"
    );
}

#[test]
fn test_multiple_patterns_in_one_match() {
    let a = NodeRef::new();
    let b = NodeRef::new();
    let head = Match::new(Pattern::node(&a).labeled("A")).pattern(Pattern::node(&b).labeled("B"));
    let _tail = head.returning([&a, &b]);
    assert_eq!(build(&head), "MATCH (n0:A), (n1:B)\nRETURN n0, n1");
}

#[test]
fn test_return_distinct_and_star() {
    let n = NodeRef::new();
    let head = Match::new(Pattern::node(&n));
    let _tail = head.returning([&n]).distinct();
    assert_eq!(build(&head), "MATCH (n0)\nRETURN DISTINCT n0");

    let m = NodeRef::new();
    let head = Match::new(Pattern::node(&m));
    let _tail = head.returning_star();
    assert_eq!(build(&head), "MATCH (n0)\nRETURN *");
}

#[test]
fn test_where_conditions_are_and_joined() {
    let n = NodeRef::new();
    let head = Match::new(Pattern::node(&n))
        .where_(gt(n.property("age"), lit(30)))
        .where_(eq(n.property("active"), lit(true)));
    let _tail = head.returning([&n]);
    assert_eq!(
        build(&head),
        "MATCH (n0)\n\
         WHERE (n0.age > 30) AND (n0.active = true)\n\
         RETURN n0"
    );
}
