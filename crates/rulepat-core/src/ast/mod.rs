//! Abstract Syntax Tree (AST) definitions for rulepat
//!
//! Node families:
//! - Generic value nodes (paths, string literals)
//! - Numeric expressions
//! - Predicates
//! - Rule and pattern definitions
//! - The tag registry and hydration

pub mod node;
pub mod numeric;
pub mod predicate;
pub mod registry;
pub mod rules;
pub mod value;

pub use node::{AstNode, Node};
pub use numeric::{NumericExpr, NumericOperand};
pub use predicate::{Predicate, PredicateOperand};
pub use registry::{hydrate, Registry};
pub use rules::{Partitioning, Pattern, Rule, SizeOp};
pub use value::{PathNode, StringNode};
