//! # Concrete Syntax Tree Access
//!
//! The generator never parses text. It walks a tree produced by tree-sitter,
//! either natively or serialized from web-tree-sitter in the browser. Both
//! shapes are read through the [`CstNode`] trait.
//!
//! ## Architecture
//!
//! ```text
//! Browser: OpenSCAD Source → web-tree-sitter → SerializedNode (JSON) ─┐
//!                                                                     ├→ CstNode → AstGenerator
//! Native:  OpenSCAD Source → tree-sitter     → tree_sitter::Node ─────┘
//! ```
//!
//! Node kinds are mapped once into the closed [`CstKind`] enum so that
//! every dispatch site is an exhaustive `match`.

use std::fmt::Debug;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub mod builder;
mod kind;
#[cfg(feature = "tree-sitter")]
mod native;
mod serialized;

pub use kind::CstKind;
pub use serialized::SerializedNode;

/// Row/column position reported by the parser.
///
/// Both row and column are zero-based; column counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Zero-based row number
    pub row: usize,
    /// Zero-based column number
    pub column: usize,
}

impl Point {
    /// Creates a point.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Read-only view of one node of a concrete syntax tree.
///
/// Implementors are cheap handles (`&SerializedNode`, `tree_sitter::Node`)
/// so the trait requires `Copy`.
///
/// Position accessors return `Option` because synthetic trees may carry no
/// positions at all; the location mapper turns that into the zero location.
pub trait CstNode: Copy + Debug {
    /// Grammar rule name, e.g. `module_instantiation`.
    fn kind(&self) -> &str;

    /// Whether the node is named in the grammar (tokens like `(` are not).
    fn is_named(&self) -> bool;

    /// Whether the parser inserted this node during error recovery.
    fn is_missing(&self) -> bool;

    /// Start row/column.
    fn start_point(&self) -> Option<Point>;

    /// End row/column.
    fn end_point(&self) -> Option<Point>;

    /// Byte offsets covered by the node.
    fn byte_range(&self) -> Option<Range<usize>>;

    /// All children in source order, including anonymous tokens.
    fn children(&self) -> Vec<Self>;

    /// The child stored under a grammar field name.
    fn child_by_field_name(&self, field: &str) -> Option<Self>;

    /// Source text covered by the node.
    fn text(&self, source: &str) -> String;

    /// The node kind as a closed enum.
    fn cst_kind(&self) -> CstKind {
        CstKind::from_kind(self.kind())
    }

    /// Whether this is an `ERROR` node.
    fn is_error(&self) -> bool {
        self.cst_kind() == CstKind::Error
    }

    /// Named children in source order.
    fn named_children(&self) -> Vec<Self> {
        self.children().into_iter().filter(|c| c.is_named()).collect()
    }

    /// Named children that carry meaning, i.e. without comments.
    fn significant_children(&self) -> Vec<Self> {
        self.named_children()
            .into_iter()
            .filter(|c| c.cst_kind() != CstKind::Comment)
            .collect()
    }

    /// The only significant child, if there is exactly one.
    ///
    /// Wrapper and grouping nodes are unwrapped through this.
    fn sole_child(&self) -> Option<Self> {
        let mut children = self.significant_children();
        if children.len() == 1 {
            children.pop()
        } else {
            None
        }
    }

    /// Whether the node ends with an anonymous `;` token.
    fn has_terminator(&self) -> bool {
        self.children()
            .iter()
            .any(|c| !c.is_named() && c.kind() == ";")
    }
}
