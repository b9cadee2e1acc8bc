//! # Source Location
//!
//! Maps CST node positions onto the line/column/offset ranges carried by
//! every AST node. Locations are computed once, when a node is built.
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::{Position, SourceLocation};
//!
//! let location = SourceLocation::new(Position::new(0, 0, 0), Position::new(0, 9, 9));
//! assert_eq!(location.len(), 9);
//! assert!(location.contains_offset(4));
//! ```

use crate::cst::CstNode;

/// A point in the source: zero-based line and column plus byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based line
    pub line: usize,
    /// Zero-based column (bytes)
    pub column: usize,
    /// Zero-based byte offset
    pub offset: usize,
}

impl Position {
    /// Creates a position.
    #[inline]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A range in the source code.
///
/// # Example
///
/// ```rust
/// use openscad_ast::{Position, SourceLocation};
///
/// // For source "cube(10);" the location of "cube" would be:
/// let location = SourceLocation::new(Position::new(0, 0, 0), Position::new(0, 4, 4));
/// assert_eq!(location.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Start of the range (inclusive)
    pub start: Position,
    /// End of the range (exclusive)
    pub end: Position,
}

impl SourceLocation {
    /// Creates a location from its endpoints.
    #[inline]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The location of nodes without position data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::SourceLocation;
    ///
    /// assert!(SourceLocation::zero().is_zero());
    /// ```
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true for the zero location.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Maps a CST node onto a location.
    ///
    /// Always succeeds. A node missing either point or its byte range (a
    /// synthetic node) maps to [`SourceLocation::zero`].
    pub fn from_node<N: CstNode>(node: &N) -> Self {
        match (node.start_point(), node.end_point(), node.byte_range()) {
            (Some(start), Some(end), Some(range)) => Self {
                start: Position::new(start.row, start.column, range.start),
                end: Position::new(end.row, end.column, range.end),
            },
            _ => Self::zero(),
        }
    }

    /// Returns the length of the range in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true if the range covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.offset >= self.end.offset
    }

    /// Creates a location that encompasses both this location and another.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::{Position, SourceLocation};
    ///
    /// let a = SourceLocation::new(Position::new(0, 0, 0), Position::new(0, 5, 5));
    /// let b = SourceLocation::new(Position::new(1, 0, 10), Position::new(1, 5, 15));
    /// let merged = a.merge(&b);
    /// assert_eq!(merged.start.offset, 0);
    /// assert_eq!(merged.end.line, 1);
    /// ```
    pub fn merge(&self, other: &SourceLocation) -> SourceLocation {
        SourceLocation {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Checks if this location contains a byte offset.
    #[inline]
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }
}
