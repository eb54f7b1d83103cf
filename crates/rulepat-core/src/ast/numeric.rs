//! Numeric expression nodes

use serde_json::{json, Value as Json};

use super::node::{serialize_list, AstNode, Node};
use super::registry::Registry;
use super::value::PathNode;
use crate::error::{AstError, Result};
use crate::types::validator;

/// A numeric computation or value
#[derive(Debug, Clone, PartialEq)]
pub enum NumericExpr {
    /// Sum of the operands; an empty list is the additive identity
    Add(Vec<NumericOperand>),

    /// Difference of exactly two operands
    Sub {
        left: Box<NumericOperand>,
        right: Box<NumericOperand>,
    },

    /// Product of the operands; an empty list is the multiplicative identity
    Mul(Vec<NumericOperand>),

    /// Quotient of exactly two operands
    Div {
        left: Box<NumericOperand>,
        right: Box<NumericOperand>,
    },

    /// Literal finite number
    Number(f64),

    /// Number of elements reachable through a path
    Count(PathNode),
}

/// Operand position accepting a numeric expression or a path reference
///
/// A path stands for "the numeric value found at this location at evaluation
/// time".
#[derive(Debug, Clone, PartialEq)]
pub enum NumericOperand {
    Expr(NumericExpr),
    Path(PathNode),
}

impl NumericExpr {
    pub fn add(children: Vec<NumericOperand>) -> Self {
        NumericExpr::Add(children)
    }

    pub fn sub(left: impl Into<NumericOperand>, right: impl Into<NumericOperand>) -> Self {
        NumericExpr::Sub {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn mul(children: Vec<NumericOperand>) -> Self {
        NumericExpr::Mul(children)
    }

    pub fn div(left: impl Into<NumericOperand>, right: impl Into<NumericOperand>) -> Self {
        NumericExpr::Div {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// Builds a number literal; non-finite values are rejected.
    pub fn number(value: f64) -> Result<Self> {
        Ok(NumericExpr::Number(validator::check_finite(value)?))
    }

    /// Builds a number literal from numeric text.
    pub fn parse_number(text: &str) -> Result<Self> {
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| AstError::invalid("numeric text", text))?;
        Self::number(value)
    }

    pub fn count(path: PathNode) -> Self {
        NumericExpr::Count(path)
    }
}

impl AstNode for NumericExpr {
    fn tag(&self) -> &'static str {
        match self {
            NumericExpr::Add(_) => "add",
            NumericExpr::Sub { .. } => "sub",
            NumericExpr::Mul(_) => "mul",
            NumericExpr::Div { .. } => "div",
            NumericExpr::Number(_) => "number",
            NumericExpr::Count(_) => "count",
        }
    }

    fn attribs(&self) -> &'static [&'static str] {
        match self {
            NumericExpr::Add(_) | NumericExpr::Mul(_) => &["children"],
            NumericExpr::Sub { .. } | NumericExpr::Div { .. } => &["left", "right"],
            NumericExpr::Number(_) => &["value"],
            NumericExpr::Count(_) => &["path"],
        }
    }

    fn serialize(&self) -> Json {
        match self {
            NumericExpr::Add(children) | NumericExpr::Mul(children) => {
                json!({ "tag": self.tag(), "children": serialize_list(children) })
            }
            NumericExpr::Sub { left, right } | NumericExpr::Div { left, right } => {
                json!({
                    "tag": self.tag(),
                    "left": left.serialize(),
                    "right": right.serialize(),
                })
            }
            NumericExpr::Number(value) => json!({ "tag": self.tag(), "value": value }),
            NumericExpr::Count(path) => json!({ "tag": self.tag(), "path": path.serialize() }),
        }
    }
}

impl AstNode for NumericOperand {
    fn tag(&self) -> &'static str {
        match self {
            NumericOperand::Expr(expr) => expr.tag(),
            NumericOperand::Path(path) => path.tag(),
        }
    }

    fn attribs(&self) -> &'static [&'static str] {
        match self {
            NumericOperand::Expr(expr) => expr.attribs(),
            NumericOperand::Path(path) => path.attribs(),
        }
    }

    fn serialize(&self) -> Json {
        match self {
            NumericOperand::Expr(expr) => expr.serialize(),
            NumericOperand::Path(path) => path.serialize(),
        }
    }
}

impl From<NumericExpr> for NumericOperand {
    fn from(expr: NumericExpr) -> Self {
        NumericOperand::Expr(expr)
    }
}

impl From<PathNode> for NumericOperand {
    fn from(path: PathNode) -> Self {
        NumericOperand::Path(path)
    }
}

impl TryFrom<Node> for NumericExpr {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Numeric(expr) => Ok(expr),
            other => Err(AstError::invalid("a numeric expression", other.to_text())),
        }
    }
}

impl TryFrom<Node> for NumericOperand {
    type Error = AstError;

    fn try_from(node: Node) -> Result<Self> {
        match node {
            Node::Numeric(expr) => Ok(NumericOperand::Expr(expr)),
            Node::Path(path) => Ok(NumericOperand::Path(path)),
            other => Err(AstError::invalid(
                "a numeric expression or path node",
                other.to_text(),
            )),
        }
    }
}

pub(crate) fn decode_operand(registry: &Registry, data: &Json) -> Result<NumericOperand> {
    NumericOperand::try_from(registry.hydrate(data)?)
}

pub(crate) fn decode_operand_list(registry: &Registry, data: &Json) -> Result<Vec<NumericOperand>> {
    validator::expect_array(validator::expect_attr(data, "children")?)?
        .iter()
        .map(|child| decode_operand(registry, child))
        .collect()
}

pub(crate) fn decode_operand_pair(
    registry: &Registry,
    data: &Json,
) -> Result<(NumericOperand, NumericOperand)> {
    let left = decode_operand(registry, validator::expect_attr(data, "left")?)?;
    let right = decode_operand(registry, validator::expect_attr(data, "right")?)?;
    Ok((left, right))
}

pub(crate) fn decode_add(registry: &Registry, data: &Json) -> Result<Node> {
    Ok(Node::Numeric(NumericExpr::add(decode_operand_list(
        registry, data,
    )?)))
}

pub(crate) fn decode_sub(registry: &Registry, data: &Json) -> Result<Node> {
    let (left, right) = decode_operand_pair(registry, data)?;
    Ok(Node::Numeric(NumericExpr::sub(left, right)))
}

pub(crate) fn decode_mul(registry: &Registry, data: &Json) -> Result<Node> {
    Ok(Node::Numeric(NumericExpr::mul(decode_operand_list(
        registry, data,
    )?)))
}

pub(crate) fn decode_div(registry: &Registry, data: &Json) -> Result<Node> {
    let (left, right) = decode_operand_pair(registry, data)?;
    Ok(Node::Numeric(NumericExpr::div(left, right)))
}

pub(crate) fn decode_number(_registry: &Registry, data: &Json) -> Result<Node> {
    let value = validator::expect_attr(data, "value")?;
    // Same two entry points direct construction exposes: a finite number or
    // numeric text.
    let number = match value.as_str() {
        Some(text) => NumericExpr::parse_number(text)?,
        None => NumericExpr::number(validator::expect_f64(value)?)?,
    };
    Ok(Node::Numeric(number))
}

pub(crate) fn decode_count(registry: &Registry, data: &Json) -> Result<Node> {
    let path = PathNode::try_from(registry.hydrate(validator::expect_attr(data, "path")?)?)?;
    Ok(Node::Numeric(NumericExpr::count(path)))
}
