//! [`CstNode`] for native tree-sitter nodes.

use std::ops::Range;

use super::{CstNode, Point};

impl<'tree> CstNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn is_named(&self) -> bool {
        tree_sitter::Node::is_named(self)
    }

    fn is_missing(&self) -> bool {
        tree_sitter::Node::is_missing(self)
    }

    fn start_point(&self) -> Option<Point> {
        let point = self.start_position();
        Some(Point::new(point.row, point.column))
    }

    fn end_point(&self) -> Option<Point> {
        let point = self.end_position();
        Some(Point::new(point.row, point.column))
    }

    fn byte_range(&self) -> Option<Range<usize>> {
        Some(self.start_byte()..self.end_byte())
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }

    fn child_by_field_name(&self, field: &str) -> Option<Self> {
        tree_sitter::Node::child_by_field_name(self, field)
    }

    fn text(&self, source: &str) -> String {
        self.utf8_text(source.as_bytes())
            .unwrap_or_default()
            .to_string()
    }
}
