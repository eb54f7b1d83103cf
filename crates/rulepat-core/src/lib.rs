//! rulepat core - AST definitions for the rulepat rule language
//!
//! This crate provides the node types a rule pattern is built from:
//! - Generic value nodes (path references, string literals)
//! - Numeric expressions
//! - Predicates (boolean expressions)
//! - Rule and pattern definitions
//!
//! Every node is validated at construction and immutable afterwards. Trees
//! serialize to a tagged plain-data form and hydrate back through a
//! tag-indexed registry; see [`ast::registry`]. A parser producing these
//! trees and an engine evaluating them live outside this crate.

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{AstNode, Node};
pub use error::{AstError, Result};
