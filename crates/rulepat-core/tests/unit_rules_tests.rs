//! Unit tests for partitioning, size, rule and pattern nodes

use rulepat_core::ast::*;
use serde_json::json;

fn string(text: &str) -> StringNode {
    StringNode::new(text)
}

fn trivial_rule() -> Rule {
    Rule::new(
        vec![string("a rule")],
        Partitioning::FullSet,
        Predicate::boolean(true),
        Predicate::boolean(true),
        Predicate::boolean(true),
    )
}

#[test]
fn test_full_set_serialization() {
    assert_eq!(Partitioning::FullSet.serialize(), json!({ "tag": "fullSet" }));
    assert_eq!(Partitioning::FullSet.attribs(), &[] as &[&str]);
}

#[test]
fn test_group_by_serialization() {
    let path = PathNode::new(["user", "country"]).unwrap();
    let partitioning = Partitioning::group_by(path);
    assert_eq!(
        partitioning.serialize(),
        json!({
            "tag": "groupBy",
            "path": { "tag": "path", "path": ["user", "country"] },
        })
    );
    assert_eq!(partitioning.attribs(), &["path"]);
}

#[test]
fn test_size_serialization() {
    assert_eq!(SizeOp.serialize(), json!({ "tag": "size" }));
    assert_eq!(SizeOp.attribs(), &[] as &[&str]);
}

#[test]
fn test_rule_serialization() {
    let rule = trivial_rule();
    assert_eq!(
        rule.serialize(),
        json!({
            "tag": "rule",
            "description": [{ "tag": "string", "value": "a rule" }],
            "partitioning": { "tag": "fullSet" },
            "filter": { "tag": "boolean", "value": true },
            "condition": { "tag": "boolean", "value": true },
            "implication": { "tag": "boolean", "value": true },
        })
    );
}

#[test]
fn test_rule_with_empty_description() {
    let rule = Rule::new(
        vec![],
        Partitioning::FullSet,
        Predicate::boolean(true),
        Predicate::boolean(false),
        Predicate::boolean(true),
    );
    assert_eq!(rule.serialize()["description"], json!([]));
}

#[test]
fn test_pattern_serialization() {
    let rule = trivial_rule();
    let pattern = Pattern::new(
        string("name"),
        vec![string("one"), string("two")],
        vec![rule.clone(), rule.clone()],
    );
    assert_eq!(
        pattern.serialize(),
        json!({
            "tag": "pattern",
            "title": { "tag": "string", "value": "name" },
            "description": [
                { "tag": "string", "value": "one" },
                { "tag": "string", "value": "two" },
            ],
            "rules": [rule.serialize(), rule.serialize()],
        })
    );
    assert_eq!(pattern.attribs(), &["title", "description", "rules"]);
}

#[test]
fn test_pattern_accepts_empty_lists() {
    let pattern = Pattern::new(string("name"), vec![], vec![]);
    assert_eq!(
        pattern.serialize(),
        json!({
            "tag": "pattern",
            "title": { "tag": "string", "value": "name" },
            "description": [],
            "rules": [],
        })
    );
}

#[test]
fn test_rule_with_realistic_predicates() {
    // Every order over 100 in each country group must have a discount entry
    let partitioning =
        Partitioning::group_by(PathNode::new(["customer", "country"]).unwrap());
    let filter = Predicate::path_exists(PathNode::new(["order"]).unwrap());
    let condition = Predicate::gt(
        PathNode::new(["order", "total"]).unwrap(),
        NumericExpr::number(100.0).unwrap(),
    );
    let implication = Predicate::path_exists(PathNode::new(["order", "discount"]).unwrap());
    let rule = Rule::new(
        vec![string("orders over 100 carry a discount")],
        partitioning,
        filter,
        condition,
        implication,
    );

    let data = rule.serialize();
    assert_eq!(data["tag"], json!("rule"));
    assert_eq!(data["partitioning"]["tag"], json!("groupBy"));
    assert_eq!(data["condition"]["tag"], json!("gt"));
    assert_eq!(
        data["condition"]["left"],
        json!({ "tag": "path", "path": ["order", "total"] })
    );
}
