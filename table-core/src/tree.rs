//! Depth-first traversal of tree-shaped row data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identity::{RowKey, get_row_identity, identity_key};
use crate::value::{Value, is_truthy};

/// Field names used to read tree structure out of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeProps {
    /// Field holding a node's child rows
    #[serde(rename = "children")]
    pub children_key: String,
    /// Field flagging a node whose children are loaded on demand
    #[serde(rename = "hasChildren")]
    pub lazy_key: String,
}

impl Default for TreeProps {
    fn default() -> Self {
        Self {
            children_key: "children".to_string(),
            lazy_key: "hasChildren".to_string(),
        }
    }
}

impl TreeProps {
    pub fn new(children_key: impl Into<String>, lazy_key: impl Into<String>) -> Self {
        Self {
            children_key: children_key.into(),
            lazy_key: lazy_key.into(),
        }
    }

    /// Whether `node` is flagged as lazily loaded.
    pub fn is_lazy(&self, node: &Value) -> bool {
        node.get(self.lazy_key.as_str()).is_some_and(is_truthy)
    }

    /// Materialized children of `node`. Missing or non-array fields give an
    /// empty slice.
    pub fn children<'a>(&self, node: &'a Value) -> &'a [Value] {
        node.get(self.children_key.as_str())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Visit every node of a forest, depth-first and pre-order.
///
/// The visitor receives the node, its children and its depth (roots are 0).
/// Lazily loaded nodes are passed `None` for children and are never
/// descended into, even if they carry a children field.
pub fn walk_tree<F>(roots: &[Value], props: &TreeProps, mut visitor: F)
where
    F: FnMut(&Value, Option<&[Value]>, usize),
{
    walk_level(roots, props, 0, &mut visitor);
}

fn walk_level<F>(nodes: &[Value], props: &TreeProps, depth: usize, visitor: &mut F)
where
    F: FnMut(&Value, Option<&[Value]>, usize),
{
    for node in nodes {
        if props.is_lazy(node) {
            visitor(node, None, depth);
            continue;
        }
        let children = props.children(node);
        visitor(node, Some(children), depth);
        walk_level(children, props, depth + 1, visitor);
    }
}

/// Depth of every node keyed by row identity, as used for tree indentation.
pub fn node_depths(roots: &[Value], props: &TreeProps, key: &RowKey) -> Result<HashMap<String, usize>> {
    let mut depths = HashMap::new();
    let mut failure = None;
    walk_tree(roots, props, |node, _, depth| {
        if failure.is_some() {
            return;
        }
        match get_row_identity(Some(node), key) {
            Ok(identity) => {
                depths.insert(identity_key(identity.as_ref()), depth);
            }
            Err(e) => failure = Some(e),
        }
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(depths),
    }
}
