//! # Value Extraction
//!
//! Folds a CST subtree that denotes a single value into a typed
//! [`ParameterValue`]: numbers, booleans, strings, 2/3-component numeric
//! vectors, and variable references. Anything else yields `None` ("no
//! value") and the caller either applies a default or lowers the subtree as
//! an expression.
//!
//! ## CST Structure
//!
//! ```text
//! array_literal          range_expression
//! ├── [                  ├── [
//! ├── number "1"         ├── start: number "0"
//! ├── ,                  ├── :
//! ├── number "2"         ├── step: number "2"
//! └── ]                  ├── :
//!                        ├── end: number "10"
//!                        └── ]
//! ```

use config::constants::{MAX_RECURSION_DEPTH, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use glam::{DVec2, DVec3};
use tracing::{debug, trace};

use crate::ast::{Expression, NumericRange, ParameterValue};
use crate::cst::{CstKind, CstNode};

/// Extracts literal values, vectors and ranges from CST subtrees.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use openscad_ast::cst::builder::{array, finish, number};
/// use openscad_ast::generator::ValueExtractor;
/// use openscad_ast::ParameterValue;
///
/// let node = finish(array(vec![number("1"), number("2"), number("3")]));
/// let extractor = ValueExtractor::new(&node.text);
/// assert_eq!(
///     extractor.value(&node),
///     Some(ParameterValue::Vector3(DVec3::new(1.0, 2.0, 3.0)))
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValueExtractor<'s> {
    source: &'s str,
    max_depth: usize,
}

impl<'s> ValueExtractor<'s> {
    /// Creates an extractor reading node text from `source`.
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    /// Caps how deeply nested vectors are followed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Extracts a single value, or `None` if the subtree is not a literal.
    pub fn value<N: CstNode>(&self, node: N) -> Option<ParameterValue> {
        self.value_at(node, 0)
    }

    /// Extracts a 2- or 3-component numeric vector from an array literal.
    ///
    /// Non-numeric elements are dropped. Any other count of numbers yields
    /// `None` rather than a malformed vector.
    pub fn vector<N: CstNode>(&self, node: N) -> Option<ParameterValue> {
        self.vector_at(node, 0)
    }

    /// Extracts `[start : end]` or `[start : step : end]` with numeric bounds.
    ///
    /// The range is recognized by its grammar kind and fields. A bound or
    /// step that is not numeric fails the whole range.
    pub fn range<N: CstNode>(&self, node: N) -> Option<NumericRange> {
        let node = self.unwrap_grouping(node);
        if node.cst_kind() != CstKind::RangeExpression {
            return None;
        }
        let start = self.number(node.child_by_field_name("start")?)?;
        let end = self.number(node.child_by_field_name("end")?)?;
        let step = match node.child_by_field_name("step") {
            Some(step) => Some(self.number(step)?),
            None => None,
        };
        Some(NumericRange { start, step, end })
    }

    /// Extracts a number, folding unary signs.
    pub fn number<N: CstNode>(&self, node: N) -> Option<f64> {
        self.value(node)?.as_number()
    }

    fn value_at<N: CstNode>(&self, node: N, depth: usize) -> Option<ParameterValue> {
        if depth > self.max_depth {
            debug!(limit = self.max_depth, "value nested too deeply to extract");
            return None;
        }
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.value_inner(node, depth)
        })
    }

    fn value_inner<N: CstNode>(&self, node: N, depth: usize) -> Option<ParameterValue> {
        let kind = node.cst_kind();
        match kind {
            CstKind::Number => parse_number(&node.text(self.source)).map(ParameterValue::Number),
            CstKind::Boolean => parse_boolean(&node.text(self.source)).map(ParameterValue::Boolean),
            CstKind::String => Some(ParameterValue::String(
                unquote(&node.text(self.source)).to_string(),
            )),
            CstKind::Undef => Some(ParameterValue::Undefined),
            CstKind::Identifier => {
                let text = node.text(self.source);
                Some(match text.as_str() {
                    "true" => ParameterValue::Boolean(true),
                    "false" => ParameterValue::Boolean(false),
                    "undef" => ParameterValue::Undefined,
                    _ => ParameterValue::Expression(Expression::Variable(text)),
                })
            }
            CstKind::SpecialVariable => Some(ParameterValue::Expression(Expression::Variable(
                node.text(self.source),
            ))),
            CstKind::ArrayLiteral => self.vector_at(node, depth),
            CstKind::UnaryExpression => self.signed_number(node, depth),
            _ if kind.is_expression_wrapper()
                || kind.is_statement_wrapper()
                || kind == CstKind::Other =>
            {
                self.value_at(node.sole_child()?, depth + 1)
            }
            _ => None,
        }
    }

    fn vector_at<N: CstNode>(&self, node: N, depth: usize) -> Option<ParameterValue> {
        let mut numbers = Vec::with_capacity(3);
        for element in node.significant_children() {
            match self.value_at(element, depth + 1) {
                Some(ParameterValue::Number(n)) => numbers.push(n),
                other => debug!(
                    element = %element.text(self.source),
                    found = other.as_ref().map_or("no value", ParameterValue::describe),
                    "dropping non-numeric vector element"
                ),
            }
        }
        match numbers[..] {
            [x, y] => Some(ParameterValue::Vector2(DVec2::new(x, y))),
            [x, y, z] => Some(ParameterValue::Vector3(DVec3::new(x, y, z))),
            _ => {
                trace!(count = numbers.len(), "array is not a 2- or 3-component vector");
                None
            }
        }
    }

    /// `-x` and `+x` over a numeric operand.
    fn signed_number<N: CstNode>(&self, node: N, depth: usize) -> Option<ParameterValue> {
        let operator = node
            .child_by_field_name("operator")
            .or_else(|| node.children().into_iter().find(|c| !c.is_named()))?
            .text(self.source);
        let operand = node
            .child_by_field_name("operand")
            .or_else(|| node.significant_children().pop())?;
        let value = self.value_at(operand, depth + 1)?.as_number()?;
        match operator.as_str() {
            "-" => Some(ParameterValue::Number(-value)),
            "+" => Some(ParameterValue::Number(value)),
            _ => None,
        }
    }

    fn unwrap_grouping<N: CstNode>(&self, mut node: N) -> N {
        while node.cst_kind().is_expression_wrapper() {
            match node.sole_child() {
                Some(inner) => node = inner,
                None => break,
            }
        }
        node
    }
}

/// Parses an OpenSCAD number literal.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn parse_boolean(text: &str) -> Option<bool> {
    match text.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips one enclosing pair of double quotes.
pub(crate) fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}
