//! # Serialized CST Types
//!
//! Receives a syntax tree serialized by web-tree-sitter in the browser, so
//! that parsing happens in JavaScript and AST generation in Rust.
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::cst::{CstNode, SerializedNode};
//!
//! let json = r#"{
//!     "type": "number", "text": "10",
//!     "startIndex": 0, "endIndex": 2,
//!     "startPosition": {"row": 0, "column": 0},
//!     "endPosition": {"row": 0, "column": 2},
//!     "isNamed": true
//! }"#;
//! let node: SerializedNode = serde_json::from_str(json).unwrap();
//! assert_eq!((&node).kind(), "number");
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{CstNode, Point};

/// A serialized syntax tree node from web-tree-sitter.
///
/// Mirrors the JavaScript `SerializedNode` interface. Everything except the
/// node type may be omitted, which lets tests and bridges build partial
/// trees; omitted positions map to the zero location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNode {
    /// Node type from grammar (e.g., "source_file", "module_instantiation")
    #[serde(rename = "type")]
    pub node_type: String,

    /// Source text covered by this node
    #[serde(default)]
    pub text: String,

    /// Byte offset where this node starts
    #[serde(rename = "startIndex", default)]
    pub start_index: Option<usize>,

    /// Byte offset where this node ends
    #[serde(rename = "endIndex", default)]
    pub end_index: Option<usize>,

    /// Start position (row, column)
    #[serde(rename = "startPosition", default)]
    pub start_position: Option<Point>,

    /// End position (row, column)
    #[serde(rename = "endPosition", default)]
    pub end_position: Option<Point>,

    /// All child nodes
    #[serde(default)]
    pub children: Vec<SerializedNode>,

    /// Named children only
    ///
    /// Only consulted when `children` is empty; older bridges sent just this
    /// list.
    #[serde(rename = "namedChildren", default)]
    pub named_children: Vec<SerializedNode>,

    /// Whether this is a named node
    #[serde(rename = "isNamed", default = "default_named")]
    pub is_named: bool,

    /// Whether error recovery inserted this node
    #[serde(rename = "isMissing", default)]
    pub is_missing: bool,

    /// Field name if this node is a field child
    #[serde(rename = "fieldName", default)]
    pub field_name: Option<String>,
}

fn default_named() -> bool {
    true
}

impl SerializedNode {
    /// Creates a named node without positions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::cst::SerializedNode;
    ///
    /// let node = SerializedNode::new("identifier", "x");
    /// assert!(node.is_named);
    /// assert!(node.start_position.is_none());
    /// ```
    pub fn new(node_type: &str, text: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            text: text.to_string(),
            start_index: None,
            end_index: None,
            start_position: None,
            end_position: None,
            children: Vec::new(),
            named_children: Vec::new(),
            is_named: true,
            is_missing: false,
            field_name: None,
        }
    }

    /// Marks this node as the child stored under `field`.
    pub fn with_field(mut self, field: &str) -> Self {
        self.field_name = Some(field.to_string());
        self
    }

    fn child_list(&self) -> &[SerializedNode] {
        if self.children.is_empty() {
            &self.named_children
        } else {
            &self.children
        }
    }
}

impl<'a> CstNode for &'a SerializedNode {
    fn kind(&self) -> &str {
        &self.node_type
    }

    fn is_named(&self) -> bool {
        self.is_named
    }

    fn is_missing(&self) -> bool {
        self.is_missing || self.node_type.starts_with("MISSING")
    }

    fn start_point(&self) -> Option<Point> {
        self.start_position
    }

    fn end_point(&self) -> Option<Point> {
        self.end_position
    }

    fn byte_range(&self) -> Option<Range<usize>> {
        Some(self.start_index?..self.end_index?)
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a SerializedNode = *self;
        node.child_list().iter().collect()
    }

    fn child_by_field_name(&self, field: &str) -> Option<Self> {
        let node: &'a SerializedNode = *self;
        node.child_list()
            .iter()
            .find(|c| c.field_name.as_deref() == Some(field))
    }

    fn text(&self, source: &str) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        self.byte_range()
            .and_then(|range| source.get(range))
            .unwrap_or_default()
            .to_string()
    }
}
