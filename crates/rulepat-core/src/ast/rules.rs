//! Rule and pattern nodes, the distributable units of the language

use serde_json::{json, Value as Json};

use super::node::{serialize_list, AstNode, Node};
use super::predicate::Predicate;
use super::registry::Registry;
use super::value::{PathNode, StringNode};
use crate::error::{AstError, Result};
use crate::types::validator;

/// Strategy for splitting a set of objects into partitions before a rule is
/// evaluated per partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partitioning {
    /// The whole object set as one partition
    FullSet,

    /// One partition per distinct value at the path
    GroupBy(PathNode),
}

impl Partitioning {
    pub fn group_by(path: PathNode) -> Self {
        Partitioning::GroupBy(path)
    }
}

impl AstNode for Partitioning {
    fn tag(&self) -> &'static str {
        match self {
            Partitioning::FullSet => "fullSet",
            Partitioning::GroupBy(_) => "groupBy",
        }
    }

    fn attribs(&self) -> &'static [&'static str] {
        match self {
            Partitioning::FullSet => &[],
            Partitioning::GroupBy(_) => &["path"],
        }
    }

    fn serialize(&self) -> Json {
        match self {
            Partitioning::FullSet => json!({ "tag": self.tag() }),
            Partitioning::GroupBy(path) => {
                json!({ "tag": self.tag(), "path": path.serialize() })
            }
        }
    }
}

impl TryFrom<Node> for Partitioning {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Partitioning(partitioning) => Ok(partitioning),
            other => Err(AstError::invalid("a partitioning node", other.to_text())),
        }
    }
}

pub(crate) fn decode_full_set(_registry: &Registry, _data: &Json) -> Result<Node> {
    Ok(Node::Partitioning(Partitioning::FullSet))
}

pub(crate) fn decode_group_by(registry: &Registry, data: &Json) -> Result<Node> {
    let path = PathNode::try_from(registry.hydrate(validator::expect_attr(data, "path")?)?)?;
    Ok(Node::Partitioning(Partitioning::group_by(path)))
}

/// Cardinality of a partition; carries no data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeOp;

impl SizeOp {
    pub const TAG: &'static str = "size";
}

impl AstNode for SizeOp {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn attribs(&self) -> &'static [&'static str] {
        &[]
    }

    fn serialize(&self) -> Json {
        json!({ "tag": self.tag() })
    }
}

pub(crate) fn decode_size(_registry: &Registry, _data: &Json) -> Result<Node> {
    Ok(Node::Size(SizeOp))
}

/// One rule
///
/// Contract for the evaluation engine: for each partition selected by
/// `partitioning` and passing `filter`, if `condition` holds then
/// `implication` must also hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub description: Vec<StringNode>,
    pub partitioning: Partitioning,
    pub filter: Predicate,
    pub condition: Predicate,
    pub implication: Predicate,
}

impl Rule {
    pub const TAG: &'static str = "rule";

    pub fn new(
        description: Vec<StringNode>,
        partitioning: Partitioning,
        filter: Predicate,
        condition: Predicate,
        implication: Predicate,
    ) -> Self {
        Rule {
            description,
            partitioning,
            filter,
            condition,
            implication,
        }
    }
}

impl AstNode for Rule {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn attribs(&self) -> &'static [&'static str] {
        &[
            "description",
            "partitioning",
            "filter",
            "condition",
            "implication",
        ]
    }

    fn serialize(&self) -> Json {
        json!({
            "tag": self.tag(),
            "description": serialize_list(&self.description),
            "partitioning": self.partitioning.serialize(),
            "filter": self.filter.serialize(),
            "condition": self.condition.serialize(),
            "implication": self.implication.serialize(),
        })
    }
}

impl TryFrom<Node> for Rule {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Rule(rule) => Ok(rule),
            other => Err(AstError::invalid("a rule node", other.to_text())),
        }
    }
}

fn decode_string_list(registry: &Registry, data: &Json) -> Result<Vec<StringNode>> {
    validator::expect_array(data)?
        .iter()
        .map(|item| StringNode::try_from(registry.hydrate(item)?))
        .collect()
}

pub(crate) fn decode_rule(registry: &Registry, data: &Json) -> Result<Node> {
    let description = decode_string_list(registry, validator::expect_attr(data, "description")?)?;
    let partitioning =
        Partitioning::try_from(registry.hydrate(validator::expect_attr(data, "partitioning")?)?)?;
    let filter = Predicate::try_from(registry.hydrate(validator::expect_attr(data, "filter")?)?)?;
    let condition =
        Predicate::try_from(registry.hydrate(validator::expect_attr(data, "condition")?)?)?;
    let implication =
        Predicate::try_from(registry.hydrate(validator::expect_attr(data, "implication")?)?)?;
    Ok(Node::Rule(Rule::new(
        description,
        partitioning,
        filter,
        condition,
        implication,
    )))
}

/// Named collection of rules, the top-level unit patterns are stored and
/// transmitted as
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub title: StringNode,
    pub description: Vec<StringNode>,
    pub rules: Vec<Rule>,
}

impl Pattern {
    pub const TAG: &'static str = "pattern";

    pub fn new(title: StringNode, description: Vec<StringNode>, rules: Vec<Rule>) -> Self {
        Pattern {
            title,
            description,
            rules,
        }
    }
}

impl AstNode for Pattern {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn attribs(&self) -> &'static [&'static str] {
        &["title", "description", "rules"]
    }

    fn serialize(&self) -> Json {
        json!({
            "tag": self.tag(),
            "title": self.title.serialize(),
            "description": serialize_list(&self.description),
            "rules": serialize_list(&self.rules),
        })
    }
}

pub(crate) fn decode_pattern(registry: &Registry, data: &Json) -> Result<Node> {
    let title = StringNode::try_from(registry.hydrate(validator::expect_attr(data, "title")?)?)?;
    let description = decode_string_list(registry, validator::expect_attr(data, "description")?)?;
    let rules = validator::expect_array(validator::expect_attr(data, "rules")?)?
        .iter()
        .map(|rule| Rule::try_from(registry.hydrate(rule)?))
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::Pattern(Pattern::new(title, description, rules)))
}
