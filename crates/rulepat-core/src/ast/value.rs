//! Generic value nodes: path references and string literals

use serde_json::{json, Value as Json};

use super::node::{AstNode, Node};
use super::registry::Registry;
use crate::error::{AstError, Result};
use crate::types::validator;

/// Reference to a field by segmented name, e.g. `order.items.price`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    path: Vec<String>,
}

impl PathNode {
    pub const TAG: &'static str = "path";

    /// Builds a path reference. The segment list must be non-empty and every
    /// segment must be a non-empty string.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path: Vec<String> = segments.into_iter().map(Into::into).collect();
        validator::check_segments(&path)?;
        Ok(PathNode { path })
    }

    pub fn segments(&self) -> &[String] {
        &self.path
    }
}

impl AstNode for PathNode {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn attribs(&self) -> &'static [&'static str] {
        &["path"]
    }

    fn serialize(&self) -> Json {
        json!({ "tag": self.tag(), "path": self.path })
    }
}

impl TryFrom<Node> for PathNode {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Path(path) => Ok(path),
            other => Err(AstError::invalid("a path node", other.to_text())),
        }
    }
}

pub(crate) fn decode_path(_registry: &Registry, data: &Json) -> Result<Node> {
    let segments = validator::expect_array(validator::expect_attr(data, "path")?)?
        .iter()
        .map(|segment| validator::expect_str(segment).map(str::to_owned))
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::Path(PathNode::new(segments)?))
}

/// Literal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringNode {
    value: String,
}

impl StringNode {
    pub const TAG: &'static str = "string";

    pub fn new(value: impl Into<String>) -> Self {
        StringNode {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl AstNode for StringNode {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn attribs(&self) -> &'static [&'static str] {
        &["value"]
    }

    fn serialize(&self) -> Json {
        json!({ "tag": self.tag(), "value": self.value })
    }
}

impl TryFrom<Node> for StringNode {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::String(string) => Ok(string),
            other => Err(AstError::invalid("a string node", other.to_text())),
        }
    }
}

pub(crate) fn decode_string(_registry: &Registry, data: &Json) -> Result<Node> {
    let value = validator::expect_str(validator::expect_attr(data, "value")?)?;
    Ok(Node::String(StringNode::new(value)))
}
