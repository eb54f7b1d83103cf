//! Predicate (boolean expression) nodes

use serde_json::{json, Value as Json};

use super::node::{serialize_list, AstNode, Node};
use super::numeric::{decode_operand_pair, NumericOperand};
use super::registry::Registry;
use super::value::PathNode;
use crate::error::{AstError, Result};
use crate::types::validator;

/// A boolean expression
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The named path is present in the object under evaluation
    PathExists(PathNode),

    /// Literal truth value
    Boolean(bool),

    /// Equality of two nodes of any type, no symmetry requirement
    Eq { left: Box<Node>, right: Box<Node> },

    /// Less-than comparison of two numeric operands
    Lt {
        left: Box<NumericOperand>,
        right: Box<NumericOperand>,
    },

    /// Less-than-or-equal comparison
    Lte {
        left: Box<NumericOperand>,
        right: Box<NumericOperand>,
    },

    /// Greater-than-or-equal comparison
    Gte {
        left: Box<NumericOperand>,
        right: Box<NumericOperand>,
    },

    /// Greater-than comparison
    Gt {
        left: Box<NumericOperand>,
        right: Box<NumericOperand>,
    },

    /// Conjunction; an empty list is vacuously true
    And(Vec<PredicateOperand>),

    /// Disjunction; an empty list is vacuously false
    Or(Vec<PredicateOperand>),

    /// Negation of exactly one operand
    Not(Box<PredicateOperand>),
}

/// Operand position accepting a predicate or a path reference
///
/// A path stands for "the truth value found at this location at evaluation
/// time".
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateOperand {
    Pred(Predicate),
    Path(PathNode),
}

impl Predicate {
    pub fn path_exists(path: PathNode) -> Self {
        Predicate::PathExists(path)
    }

    pub fn boolean(value: bool) -> Self {
        Predicate::Boolean(value)
    }

    /// Coerces text: after trimming, exactly `"true"` is true and any other
    /// text, including empty, is false.
    pub fn boolean_text(text: &str) -> Self {
        Predicate::Boolean(text.trim() == "true")
    }

    /// Coerces arbitrary plain data to a truth value.
    ///
    /// Null is false; numbers are true unless zero; text follows
    /// [`Predicate::boolean_text`]; lists and records are true even when
    /// empty.
    pub fn truthy(value: &Json) -> Self {
        let value = match value {
            Json::Null => false,
            Json::Bool(flag) => *flag,
            Json::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
            Json::String(text) => text.trim() == "true",
            Json::Array(_) | Json::Object(_) => true,
        };
        Predicate::Boolean(value)
    }

    pub fn eq(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Predicate::Eq {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn lt(left: impl Into<NumericOperand>, right: impl Into<NumericOperand>) -> Self {
        Predicate::Lt {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn lte(left: impl Into<NumericOperand>, right: impl Into<NumericOperand>) -> Self {
        Predicate::Lte {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn gte(left: impl Into<NumericOperand>, right: impl Into<NumericOperand>) -> Self {
        Predicate::Gte {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn gt(left: impl Into<NumericOperand>, right: impl Into<NumericOperand>) -> Self {
        Predicate::Gt {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn and(children: Vec<PredicateOperand>) -> Self {
        Predicate::And(children)
    }

    pub fn or(children: Vec<PredicateOperand>) -> Self {
        Predicate::Or(children)
    }

    pub fn not(operand: impl Into<PredicateOperand>) -> Self {
        Predicate::Not(Box::new(operand.into()))
    }
}

impl AstNode for Predicate {
    fn tag(&self) -> &'static str {
        match self {
            Predicate::PathExists(_) => "pathExists",
            Predicate::Boolean(_) => "boolean",
            Predicate::Eq { .. } => "eq",
            Predicate::Lt { .. } => "lt",
            Predicate::Lte { .. } => "lte",
            Predicate::Gte { .. } => "gte",
            Predicate::Gt { .. } => "gt",
            Predicate::And(_) => "and",
            Predicate::Or(_) => "or",
            Predicate::Not(_) => "not",
        }
    }

    fn attribs(&self) -> &'static [&'static str] {
        match self {
            Predicate::PathExists(_) | Predicate::Not(_) => &["child"],
            Predicate::Boolean(_) => &["value"],
            Predicate::Eq { .. }
            | Predicate::Lt { .. }
            | Predicate::Lte { .. }
            | Predicate::Gte { .. }
            | Predicate::Gt { .. } => &["left", "right"],
            Predicate::And(_) | Predicate::Or(_) => &["children"],
        }
    }

    fn serialize(&self) -> Json {
        match self {
            Predicate::PathExists(path) => {
                json!({ "tag": self.tag(), "child": path.serialize() })
            }
            Predicate::Boolean(value) => json!({ "tag": self.tag(), "value": value }),
            Predicate::Eq { left, right } => json!({
                "tag": self.tag(),
                "left": left.serialize(),
                "right": right.serialize(),
            }),
            Predicate::Lt { left, right }
            | Predicate::Lte { left, right }
            | Predicate::Gte { left, right }
            | Predicate::Gt { left, right } => json!({
                "tag": self.tag(),
                "left": left.serialize(),
                "right": right.serialize(),
            }),
            Predicate::And(children) | Predicate::Or(children) => {
                json!({ "tag": self.tag(), "children": serialize_list(children) })
            }
            Predicate::Not(operand) => {
                json!({ "tag": self.tag(), "child": operand.serialize() })
            }
        }
    }
}

impl AstNode for PredicateOperand {
    fn tag(&self) -> &'static str {
        match self {
            PredicateOperand::Pred(pred) => pred.tag(),
            PredicateOperand::Path(path) => path.tag(),
        }
    }

    fn attribs(&self) -> &'static [&'static str] {
        match self {
            PredicateOperand::Pred(pred) => pred.attribs(),
            PredicateOperand::Path(path) => path.attribs(),
        }
    }

    fn serialize(&self) -> Json {
        match self {
            PredicateOperand::Pred(pred) => pred.serialize(),
            PredicateOperand::Path(path) => path.serialize(),
        }
    }
}

impl From<Predicate> for PredicateOperand {
    fn from(pred: Predicate) -> Self {
        PredicateOperand::Pred(pred)
    }
}

impl From<PathNode> for PredicateOperand {
    fn from(path: PathNode) -> Self {
        PredicateOperand::Path(path)
    }
}

impl TryFrom<Node> for Predicate {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Predicate(pred) => Ok(pred),
            other => Err(AstError::invalid("a predicate node", other.to_text())),
        }
    }
}

impl TryFrom<Node> for PredicateOperand {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Predicate(pred) => Ok(PredicateOperand::Pred(pred)),
            Node::Path(path) => Ok(PredicateOperand::Path(path)),
            other => Err(AstError::invalid(
                "a predicate or path node",
                other.to_text(),
            )),
        }
    }
}

fn decode_predicate_operand(registry: &Registry, data: &Json) -> Result<PredicateOperand> {
    PredicateOperand::try_from(registry.hydrate(data)?)
}

fn decode_predicate_operand_list(
    registry: &Registry,
    data: &Json,
) -> Result<Vec<PredicateOperand>> {
    validator::expect_array(validator::expect_attr(data, "children")?)?
        .iter()
        .map(|child| decode_predicate_operand(registry, child))
        .collect()
}

pub(crate) fn decode_path_exists(registry: &Registry, data: &Json) -> Result<Node> {
    let path = PathNode::try_from(registry.hydrate(validator::expect_attr(data, "child")?)?)?;
    Ok(Node::Predicate(Predicate::path_exists(path)))
}

pub(crate) fn decode_boolean(_registry: &Registry, data: &Json) -> Result<Node> {
    // Coercion mirrors direct construction; an absent attribute coerces the
    // same way an absent argument does.
    let value = data.get("value").unwrap_or(&Json::Null);
    Ok(Node::Predicate(Predicate::truthy(value)))
}

pub(crate) fn decode_eq(registry: &Registry, data: &Json) -> Result<Node> {
    let left = registry.hydrate(validator::expect_attr(data, "left")?)?;
    let right = registry.hydrate(validator::expect_attr(data, "right")?)?;
    Ok(Node::Predicate(Predicate::eq(left, right)))
}

pub(crate) fn decode_lt(registry: &Registry, data: &Json) -> Result<Node> {
    let (left, right) = decode_operand_pair(registry, data)?;
    Ok(Node::Predicate(Predicate::lt(left, right)))
}

pub(crate) fn decode_lte(registry: &Registry, data: &Json) -> Result<Node> {
    let (left, right) = decode_operand_pair(registry, data)?;
    Ok(Node::Predicate(Predicate::lte(left, right)))
}

pub(crate) fn decode_gte(registry: &Registry, data: &Json) -> Result<Node> {
    let (left, right) = decode_operand_pair(registry, data)?;
    Ok(Node::Predicate(Predicate::gte(left, right)))
}

pub(crate) fn decode_gt(registry: &Registry, data: &Json) -> Result<Node> {
    let (left, right) = decode_operand_pair(registry, data)?;
    Ok(Node::Predicate(Predicate::gt(left, right)))
}

pub(crate) fn decode_and(registry: &Registry, data: &Json) -> Result<Node> {
    Ok(Node::Predicate(Predicate::and(
        decode_predicate_operand_list(registry, data)?,
    )))
}

pub(crate) fn decode_or(registry: &Registry, data: &Json) -> Result<Node> {
    Ok(Node::Predicate(Predicate::or(
        decode_predicate_operand_list(registry, data)?,
    )))
}

pub(crate) fn decode_not(registry: &Registry, data: &Json) -> Result<Node> {
    let operand = decode_predicate_operand(registry, validator::expect_attr(data, "child")?)?;
    Ok(Node::Predicate(Predicate::not(operand)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_text_coercion() {
        assert_eq!(Predicate::boolean_text("true"), Predicate::Boolean(true));
        assert_eq!(Predicate::boolean_text(" true "), Predicate::Boolean(true));
        assert_eq!(Predicate::boolean_text("false"), Predicate::Boolean(false));
        assert_eq!(Predicate::boolean_text("TRUE"), Predicate::Boolean(false));
        assert_eq!(
            Predicate::boolean_text("anything else"),
            Predicate::Boolean(false)
        );
        assert_eq!(Predicate::boolean_text(""), Predicate::Boolean(false));
    }

    #[test]
    fn test_truthy_coercion_table() {
        assert_eq!(Predicate::truthy(&json!(null)), Predicate::Boolean(false));
        assert_eq!(Predicate::truthy(&json!(true)), Predicate::Boolean(true));
        assert_eq!(Predicate::truthy(&json!(false)), Predicate::Boolean(false));
        assert_eq!(Predicate::truthy(&json!(1)), Predicate::Boolean(true));
        assert_eq!(Predicate::truthy(&json!(0)), Predicate::Boolean(false));
        assert_eq!(Predicate::truthy(&json!(-0.5)), Predicate::Boolean(true));
        assert_eq!(Predicate::truthy(&json!("true")), Predicate::Boolean(true));
        assert_eq!(Predicate::truthy(&json!("no")), Predicate::Boolean(false));
        // Empty structured values coerce to true, like the host language the
        // wire format originated in.
        assert_eq!(Predicate::truthy(&json!([])), Predicate::Boolean(true));
        assert_eq!(Predicate::truthy(&json!({})), Predicate::Boolean(true));
    }

    #[test]
    fn test_empty_and_or_are_identities() {
        assert_eq!(
            Predicate::and(vec![]).serialize(),
            json!({ "tag": "and", "children": [] })
        );
        assert_eq!(
            Predicate::or(vec![]).serialize(),
            json!({ "tag": "or", "children": [] })
        );
    }

    #[test]
    fn test_not_serializes_child() {
        let path = PathNode::new(["flag"]).unwrap();
        let pred = Predicate::not(path);
        assert_eq!(
            pred.serialize(),
            json!({
                "tag": "not",
                "child": { "tag": "path", "path": ["flag"] },
            })
        );
        assert_eq!(pred.attribs(), &["child"]);
    }

    #[test]
    fn test_eq_accepts_any_two_nodes() {
        let pred = Predicate::eq(
            crate::ast::value::StringNode::new("name"),
            PathNode::new(["user", "name"]).unwrap(),
        );
        assert_eq!(
            pred.serialize(),
            json!({
                "tag": "eq",
                "left": { "tag": "string", "value": "name" },
                "right": { "tag": "path", "path": ["user", "name"] },
            })
        );
    }

    #[test]
    fn test_comparison_tags() {
        let one = crate::ast::numeric::NumericExpr::number(1.0).unwrap();
        let two = crate::ast::numeric::NumericExpr::number(2.0).unwrap();
        assert_eq!(Predicate::lt(one.clone(), two.clone()).tag(), "lt");
        assert_eq!(Predicate::lte(one.clone(), two.clone()).tag(), "lte");
        assert_eq!(Predicate::gte(one.clone(), two.clone()).tag(), "gte");
        assert_eq!(Predicate::gt(one, two).tag(), "gt");
    }
}
