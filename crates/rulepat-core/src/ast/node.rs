//! Base node contract shared by every AST variant

use serde_json::Value as Json;

use super::numeric::{NumericExpr, NumericOperand};
use super::predicate::{Predicate, PredicateOperand};
use super::rules::{Partitioning, Pattern, Rule, SizeOp};
use super::value::{PathNode, StringNode};

/// Contract every concrete AST variant satisfies
pub trait AstNode {
    /// Stable tag identifying the variant in serialized data
    fn tag(&self) -> &'static str;

    /// Ordered attribute names needed to reconstruct the node, empty for
    /// data-less variants
    fn attribs(&self) -> &'static [&'static str];

    /// Tagged plain-data form: `{"tag": ..., <attr>: ...}` with nested nodes
    /// and node lists serialized recursively
    fn serialize(&self) -> Json;

    /// Canonical textual form, the JSON text of [`AstNode::serialize`]
    fn to_text(&self) -> String {
        self.serialize().to_string()
    }
}

/// Serializes a list of nodes elementwise, order-preserving.
pub(crate) fn serialize_list<T: AstNode>(items: &[T]) -> Json {
    Json::Array(items.iter().map(AstNode::serialize).collect())
}

/// Any AST node
///
/// Used wherever a field accepts every variant family (equality operands) and
/// as the result type of hydration.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Path(PathNode),
    String(StringNode),
    Numeric(NumericExpr),
    Predicate(Predicate),
    Partitioning(Partitioning),
    Size(SizeOp),
    Rule(Rule),
    Pattern(Pattern),
}

impl AstNode for Node {
    fn tag(&self) -> &'static str {
        match self {
            Node::Path(n) => n.tag(),
            Node::String(n) => n.tag(),
            Node::Numeric(n) => n.tag(),
            Node::Predicate(n) => n.tag(),
            Node::Partitioning(n) => n.tag(),
            Node::Size(n) => n.tag(),
            Node::Rule(n) => n.tag(),
            Node::Pattern(n) => n.tag(),
        }
    }

    fn attribs(&self) -> &'static [&'static str] {
        match self {
            Node::Path(n) => n.attribs(),
            Node::String(n) => n.attribs(),
            Node::Numeric(n) => n.attribs(),
            Node::Predicate(n) => n.attribs(),
            Node::Partitioning(n) => n.attribs(),
            Node::Size(n) => n.attribs(),
            Node::Rule(n) => n.attribs(),
            Node::Pattern(n) => n.attribs(),
        }
    }

    fn serialize(&self) -> Json {
        match self {
            Node::Path(n) => n.serialize(),
            Node::String(n) => n.serialize(),
            Node::Numeric(n) => n.serialize(),
            Node::Predicate(n) => n.serialize(),
            Node::Partitioning(n) => n.serialize(),
            Node::Size(n) => n.serialize(),
            Node::Rule(n) => n.serialize(),
            Node::Pattern(n) => n.serialize(),
        }
    }
}

impl From<PathNode> for Node {
    fn from(node: PathNode) -> Self {
        Node::Path(node)
    }
}

impl From<StringNode> for Node {
    fn from(node: StringNode) -> Self {
        Node::String(node)
    }
}

impl From<NumericExpr> for Node {
    fn from(node: NumericExpr) -> Self {
        Node::Numeric(node)
    }
}

impl From<Predicate> for Node {
    fn from(node: Predicate) -> Self {
        Node::Predicate(node)
    }
}

impl From<Partitioning> for Node {
    fn from(node: Partitioning) -> Self {
        Node::Partitioning(node)
    }
}

impl From<SizeOp> for Node {
    fn from(node: SizeOp) -> Self {
        Node::Size(node)
    }
}

impl From<Rule> for Node {
    fn from(node: Rule) -> Self {
        Node::Rule(node)
    }
}

impl From<Pattern> for Node {
    fn from(node: Pattern) -> Self {
        Node::Pattern(node)
    }
}

impl From<NumericOperand> for Node {
    fn from(operand: NumericOperand) -> Self {
        match operand {
            NumericOperand::Expr(expr) => Node::Numeric(expr),
            NumericOperand::Path(path) => Node::Path(path),
        }
    }
}

impl From<PredicateOperand> for Node {
    fn from(operand: PredicateOperand) -> Self {
        match operand {
            PredicateOperand::Pred(pred) => Node::Predicate(pred),
            PredicateOperand::Path(path) => Node::Path(path),
        }
    }
}

/// The tagged form doubles as the serde representation, so trees can be fed
/// to any serde sink and stay byte-compatible with [`AstNode::serialize`].
macro_rules! impl_serde_serialize {
    ($($ty:ty),* $(,)?) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&AstNode::serialize(self), serializer)
            }
        }
    )*};
}

impl_serde_serialize!(
    PathNode,
    StringNode,
    NumericExpr,
    NumericOperand,
    Predicate,
    PredicateOperand,
    Partitioning,
    SizeOp,
    Rule,
    Pattern,
    Node,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_delegates_to_variant() {
        let node = Node::from(StringNode::new("name"));
        assert_eq!(node.tag(), "string");
        assert_eq!(node.attribs(), &["value"]);
        assert_eq!(node.serialize(), json!({ "tag": "string", "value": "name" }));
    }

    #[test]
    fn test_to_text_is_serialize_json() {
        let node = Node::from(SizeOp);
        assert_eq!(node.to_text(), r#"{"tag":"size"}"#);
    }

    #[test]
    fn test_serde_matches_tagged_form() {
        let path = PathNode::new(["a", "b"]).unwrap();
        let via_serde = serde_json::to_value(&path).unwrap();
        assert_eq!(via_serde, AstNode::serialize(&path));
    }
}
