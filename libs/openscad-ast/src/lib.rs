//! # OpenSCAD AST Crate
//!
//! Converts a tree-sitter CST (Concrete Syntax Tree) of an OpenSCAD program
//! into a typed AST (Abstract Syntax Tree). Every node carries the source
//! location it was built from.
//!
//! ## Architecture
//!
//! ### Native
//!
//! ```text
//! OpenSCAD Source → tree-sitter (CST) → generate → Vec<AstNode>
//! ```
//!
//! ### Browser (WASM)
//!
//! ```text
//! OpenSCAD Source → web-tree-sitter (JS) → Serialized CST → parse_from_json → Vec<AstNode>
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::cst::builder::*;
//! use openscad_ast::{parse_from_cst, AstNode, CubeSize};
//!
//! // cube(10);
//! let root = source_file(vec![module_call("cube", vec![arg(number("10"))])]);
//! let nodes = parse_from_cst(&root).unwrap();
//! assert!(matches!(
//!     nodes[..],
//!     [AstNode::Cube { size: CubeSize::Scalar(s), center: false, .. }] if s == 10.0
//! ));
//! ```
//!
//! ## Design Principles
//!
//! - **Typed AST**: closed enums on both sides; dispatch is an exhaustive match
//! - **Source Mapping**: every node carries a [`SourceLocation`]
//! - **No Evaluation**: pure syntax transformation, expressions stay symbolic
//! - **Editor Tolerant**: malformed statements are skipped, not fatal

pub mod ast;
pub mod cst;
pub mod error;
pub mod generator;
pub mod location;
pub mod special_vars;

use tracing::instrument;

pub use ast::*;
pub use cst::{CstKind, CstNode, SerializedNode};
pub use error::{ExpressionError, GenerateError};
pub use generator::AstGenerator;
pub use location::{Position, SourceLocation};

/// Generates the AST for the tree rooted at `root`.
///
/// `source` is the text the tree was parsed from; node text is sliced from
/// it when the tree does not carry text itself.
#[instrument(skip_all)]
pub fn generate<N: CstNode>(root: N, source: &str) -> Result<Vec<AstNode>, GenerateError> {
    AstGenerator::new(source).generate(root)
}

/// Generates the AST for a serialized CST, using the root's text as source.
///
/// # Example
///
/// ```rust
/// use openscad_ast::cst::builder::*;
/// use openscad_ast::{parse_from_cst, AstNode};
///
/// let root = source_file(vec![module_call_with_body("union", vec![], block(vec![]))]);
/// let nodes = parse_from_cst(&root).unwrap();
/// assert!(matches!(&nodes[..], [AstNode::Union { children, .. }] if children.is_empty()));
/// ```
pub fn parse_from_cst(root: &SerializedNode) -> Result<Vec<AstNode>, GenerateError> {
    generate(root, &root.text)
}

/// Generates the AST for a web-tree-sitter JSON tree.
///
/// # Example
///
/// ```rust
/// use openscad_ast::{parse_from_json, GenerateError};
///
/// let err = parse_from_json("{ not json").unwrap_err();
/// assert!(matches!(err, GenerateError::InvalidCst(_)));
/// ```
pub fn parse_from_json(json: &str) -> Result<Vec<AstNode>, GenerateError> {
    let root: SerializedNode = serde_json::from_str(json)?;
    parse_from_cst(&root)
}
