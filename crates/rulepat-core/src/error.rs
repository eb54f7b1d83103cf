//! Error types for rulepat core

use thiserror::Error;

/// Errors raised while constructing or hydrating AST nodes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstError {
    /// A constructor argument matched no acceptable alternative
    #[error("invalid argument: expected {expected}, got {got}")]
    InvalidArgument { expected: String, got: String },

    /// Hydration met a tag with no registered decoder
    #[error("unknown node tag: {0}")]
    UnknownTag(String),
}

impl AstError {
    pub(crate) fn invalid(expected: impl Into<String>, got: impl std::fmt::Display) -> Self {
        AstError::InvalidArgument {
            expected: expected.into(),
            got: got.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AstError>;
