//! Tag registry and hydration, the inverse of [`AstNode::serialize`](super::AstNode::serialize)
//!
//! Every concrete variant is registered under its tag exactly once, in the
//! explicit sequence in [`Registry::new`]. Hydration looks the tag up, reads
//! the variant's declared attributes in order, hydrates nested values
//! recursively and invokes the same fallible constructors direct callers use,
//! so a tampered serialized tree is rejected exactly as the equivalent
//! direct-construction call would be.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value as Json;

use super::node::Node;
use super::value::{PathNode, StringNode};
use super::{numeric, predicate, rules, value};
use crate::error::{AstError, Result};
use crate::types::validator;

type Decoder = fn(&Registry, &Json) -> Result<Node>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Write-once mapping from tag string to node decoder
pub struct Registry {
    decoders: HashMap<&'static str, Decoder>,
}

impl Registry {
    /// Builds a registry with every concrete variant registered.
    pub fn new() -> Self {
        let mut decoders: HashMap<&'static str, Decoder> = HashMap::new();
        let mut register = |tag: &'static str, decode: Decoder| {
            let previous = decoders.insert(tag, decode);
            debug_assert!(previous.is_none(), "duplicate node tag: {tag}");
        };

        // Generic value nodes
        register(PathNode::TAG, value::decode_path);
        register(StringNode::TAG, value::decode_string);

        // Numeric expressions
        register("add", numeric::decode_add);
        register("sub", numeric::decode_sub);
        register("mul", numeric::decode_mul);
        register("div", numeric::decode_div);
        register("number", numeric::decode_number);
        register("count", numeric::decode_count);

        // Predicates
        register("pathExists", predicate::decode_path_exists);
        register("boolean", predicate::decode_boolean);
        register("eq", predicate::decode_eq);
        register("lt", predicate::decode_lt);
        register("lte", predicate::decode_lte);
        register("gte", predicate::decode_gte);
        register("gt", predicate::decode_gt);
        register("and", predicate::decode_and);
        register("or", predicate::decode_or);
        register("not", predicate::decode_not);

        // Rules and patterns
        register("fullSet", rules::decode_full_set);
        register("groupBy", rules::decode_group_by);
        register(rules::SizeOp::TAG, rules::decode_size);
        register(rules::Rule::TAG, rules::decode_rule);
        register(rules::Pattern::TAG, rules::decode_pattern);

        drop(register);
        log::debug!("registered {} node decoders", decoders.len());
        Registry { decoders }
    }

    /// The process-wide registry, built on first use and read-only after.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Reconstructs a node tree from its tagged serialized form.
    ///
    /// An unknown tag fails without recursing into the data below it.
    pub fn hydrate(&self, data: &Json) -> Result<Node> {
        let tag = data
            .get("tag")
            .and_then(Json::as_str)
            .ok_or_else(|| AstError::invalid("a tagged node record", data))?;
        let decode = self
            .decoders
            .get(tag)
            .ok_or_else(|| AstError::UnknownTag(tag.to_string()))?;
        decode(self, data)
    }

    /// Hydrates a serialized list of nodes elementwise, order-preserving.
    pub fn hydrate_list(&self, data: &Json) -> Result<Vec<Node>> {
        validator::expect_array(data)?
            .iter()
            .map(|item| self.hydrate(item))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Hydrates through the process-wide registry.
pub fn hydrate(data: &Json) -> Result<Node> {
    Registry::global().hydrate(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALL_TAGS: &[&str] = &[
        "path",
        "string",
        "add",
        "sub",
        "mul",
        "div",
        "number",
        "count",
        "pathExists",
        "boolean",
        "eq",
        "lt",
        "lte",
        "gte",
        "gt",
        "and",
        "or",
        "not",
        "fullSet",
        "groupBy",
        "size",
        "rule",
        "pattern",
    ];

    #[test]
    fn test_every_variant_is_registered() {
        let registry = Registry::new();
        for tag in ALL_TAGS {
            assert!(registry.contains(tag), "missing decoder for tag {tag}");
        }
        assert_eq!(registry.len(), ALL_TAGS.len());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result = hydrate(&json!({ "tag": "bogus" }));
        assert_eq!(result, Err(AstError::UnknownTag("bogus".to_string())));
    }

    #[test]
    fn test_untagged_data_is_rejected() {
        assert!(matches!(
            hydrate(&json!(42)),
            Err(AstError::InvalidArgument { .. })
        ));
        assert!(matches!(
            hydrate(&json!({ "value": 42.0 })),
            Err(AstError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_hydrate_list_preserves_order() {
        let data = json!([
            { "tag": "number", "value": 1.0 },
            { "tag": "number", "value": 2.0 },
        ]);
        let nodes = Registry::global().hydrate_list(&data).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[0],
            Node::Numeric(crate::ast::numeric::NumericExpr::Number(1.0))
        );
    }
}
