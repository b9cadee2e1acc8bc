//! # Expression Lowering
//!
//! Recursively rebuilds [`Expression`] trees from expression subtrees.
//! Lowering is all-or-nothing: a composite expression whose slot is missing
//! or fails to lower fails as a whole, and the caller substitutes
//! [`Expression::Unresolved`] carrying the source text.
//!
//! ## CST Structure
//!
//! ```text
//! conditional_expression          conditional_expression (no fields)
//! ├── condition: identifier       ├── identifier        [0]
//! ├── ?                           ├── ?                 [1]
//! ├── consequence: number         ├── number            [2]
//! ├── :                           ├── :                 [3]
//! └── alternative: number         └── number            [4]
//! ```

use config::constants::{MAX_RECURSION_DEPTH, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use tracing::debug;

use super::extract::{parse_boolean, parse_number, unquote};
use crate::ast::{Argument, BinaryOp, Expression, Literal, UnaryOp};
use crate::cst::{CstKind, CstNode};
use crate::error::{ExpressionError, GenerateError};
use crate::location::SourceLocation;

type Lowered = Result<Expression, ExpressionError>;

/// Lowers CST expression subtrees into [`Expression`] nodes.
///
/// # Example
///
/// ```rust
/// use openscad_ast::cst::builder::{binary, finish, ident, number};
/// use openscad_ast::generator::ExpressionBuilder;
/// use openscad_ast::{BinaryOp, Expression};
///
/// let node = finish(binary(ident("x"), "*", number("2")));
/// let expression = ExpressionBuilder::new(&node.text).lower(&node).unwrap();
/// assert!(matches!(expression, Expression::Binary { op: BinaryOp::Multiply, .. }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExpressionBuilder<'s> {
    source: &'s str,
    max_depth: usize,
}

impl<'s> ExpressionBuilder<'s> {
    /// Creates a builder reading node text from `source`.
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    /// Caps expression nesting; deeper input fails with
    /// [`ExpressionError::TooDeep`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Lowers a subtree, failing if any part of it cannot be lowered.
    pub fn lower<N: CstNode>(&self, node: N) -> Lowered {
        self.lower_at(node, 0)
    }

    /// Lowers a subtree, substituting [`Expression::Unresolved`] on failure.
    ///
    /// Only excessive nesting is reported as an error.
    pub fn lower_or_unresolved<N: CstNode>(&self, node: N) -> Result<Expression, GenerateError> {
        match self.lower(node) {
            Ok(expression) => Ok(expression),
            Err(err) => match err.escalate() {
                Some(hard) => Err(hard),
                None => {
                    let text = node.text(self.source);
                    debug!(%err, text = %text, "expression left unresolved");
                    Ok(Expression::Unresolved(text))
                }
            },
        }
    }

    fn lower_at<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        if depth > self.max_depth {
            return Err(ExpressionError::TooDeep {
                limit: self.max_depth,
                location: SourceLocation::from_node(&node),
            });
        }
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.lower_kind(node, depth)
        })
    }

    fn lower_kind<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let kind = node.cst_kind();
        match kind {
            CstKind::Number => {
                let text = node.text(self.source);
                parse_number(&text)
                    .map(Expression::number)
                    .ok_or(ExpressionError::InvalidLiteral(text))
            }
            CstKind::String => Ok(Expression::Literal(Literal::String(
                unquote(&node.text(self.source)).to_string(),
            ))),
            CstKind::Boolean => {
                let text = node.text(self.source);
                parse_boolean(&text)
                    .map(|b| Expression::Literal(Literal::Boolean(b)))
                    .ok_or(ExpressionError::InvalidLiteral(text))
            }
            CstKind::Undef => Ok(Expression::Literal(Literal::Undef)),
            CstKind::Identifier => {
                let text = node.text(self.source);
                Ok(match text.as_str() {
                    "true" => Expression::Literal(Literal::Boolean(true)),
                    "false" => Expression::Literal(Literal::Boolean(false)),
                    "undef" => Expression::Literal(Literal::Undef),
                    _ => Expression::Variable(text),
                })
            }
            CstKind::SpecialVariable => Ok(Expression::Variable(node.text(self.source))),
            CstKind::ArrayLiteral => node
                .significant_children()
                .into_iter()
                .map(|item| self.lower_at(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Expression::Array),
            CstKind::RangeExpression => self.range(node, depth),
            CstKind::BinaryExpression => self.binary(node, depth),
            CstKind::UnaryExpression => self.unary(node, depth),
            CstKind::ConditionalExpression => self.conditional(node, depth),
            CstKind::CallExpression => self.call(node, depth),
            CstKind::IndexExpression => Ok(Expression::Index {
                value: self.boxed(self.slot_any(node, &["value", "array"])?, depth)?,
                index: self.boxed(self.slot(node, "index")?, depth)?,
            }),
            CstKind::MemberExpression => Ok(Expression::Member {
                object: self.boxed(self.slot(node, "object")?, depth)?,
                member: self.slot(node, "property")?.text(self.source),
            }),
            CstKind::LetExpression => self.let_expression(node, depth),
            _ if kind.is_expression_wrapper() || kind == CstKind::Other => match node.sole_child()
            {
                Some(inner) => self.lower_at(inner, depth + 1),
                None => Err(ExpressionError::Unsupported(node.kind().to_string())),
            },
            _ => Err(ExpressionError::Unsupported(node.kind().to_string())),
        }
    }

    // ============ Slots ============

    fn slot<N: CstNode>(&self, node: N, field: &'static str) -> Result<N, ExpressionError> {
        node.child_by_field_name(field)
            .ok_or_else(|| ExpressionError::MissingSlot {
                kind: node.kind().to_string(),
                slot: field,
            })
    }

    /// The first of several field names the grammar may use for a slot.
    fn slot_any<N: CstNode>(&self, node: N, fields: &[&'static str]) -> Result<N, ExpressionError> {
        fields
            .iter()
            .find_map(|field| node.child_by_field_name(field))
            .ok_or_else(|| ExpressionError::MissingSlot {
                kind: node.kind().to_string(),
                slot: fields.first().copied().unwrap_or("value"),
            })
    }

    fn boxed<N: CstNode>(&self, node: N, depth: usize) -> Result<Box<Expression>, ExpressionError> {
        self.lower_at(node, depth + 1).map(Box::new)
    }

    // ============ Composite Forms ============

    fn range<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let step = match node.child_by_field_name("step") {
            Some(step) => Some(self.boxed(step, depth)?),
            None => None,
        };
        Ok(Expression::Range {
            start: self.boxed(self.slot(node, "start")?, depth)?,
            step,
            end: self.boxed(self.slot(node, "end")?, depth)?,
        })
    }

    /// `left op right`, by field or as three positional children.
    fn binary<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let children = node.children();
        let (left, operator, right) = match (
            node.child_by_field_name("left"),
            node.child_by_field_name("operator"),
            node.child_by_field_name("right"),
        ) {
            (Some(left), Some(operator), Some(right)) => (left, operator, right),
            _ if children.len() == 3 => (children[0], children[1], children[2]),
            _ => {
                return Err(ExpressionError::MissingSlot {
                    kind: node.kind().to_string(),
                    slot: "operator",
                })
            }
        };
        let symbol = operator.text(self.source);
        let op = BinaryOp::from_symbol(symbol.trim())
            .ok_or(ExpressionError::UnknownOperator(symbol))?;
        Ok(Expression::Binary {
            op,
            left: self.boxed(left, depth)?,
            right: self.boxed(right, depth)?,
        })
    }

    fn unary<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let operator = node
            .child_by_field_name("operator")
            .or_else(|| node.children().into_iter().find(|c| !c.is_named()))
            .ok_or_else(|| ExpressionError::MissingSlot {
                kind: node.kind().to_string(),
                slot: "operator",
            })?;
        let operand = node
            .child_by_field_name("operand")
            .or_else(|| node.significant_children().pop())
            .ok_or_else(|| ExpressionError::MissingSlot {
                kind: node.kind().to_string(),
                slot: "operand",
            })?;
        let symbol = operator.text(self.source);
        let op = UnaryOp::from_symbol(symbol.trim())
            .ok_or(ExpressionError::UnknownOperator(symbol))?;
        Ok(Expression::Unary {
            op,
            operand: self.boxed(operand, depth)?,
        })
    }

    /// `c ? a : b`, by field or as children 0, 2 and 4.
    fn conditional<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let fielded = (
            node.child_by_field_name("condition"),
            node.child_by_field_name("consequence"),
            node.child_by_field_name("alternative"),
        );
        let (condition, then_branch, else_branch) = match fielded {
            (Some(c), Some(t), Some(e)) => (c, t, e),
            _ => {
                let children = node.children();
                match (children.first(), children.get(2), children.get(4)) {
                    (Some(c), Some(t), Some(e)) => (*c, *t, *e),
                    _ => {
                        return Err(ExpressionError::MissingSlot {
                            kind: node.kind().to_string(),
                            slot: "alternative",
                        })
                    }
                }
            }
        };
        Ok(Expression::Conditional {
            condition: self.boxed(condition, depth)?,
            then_branch: self.boxed(then_branch, depth)?,
            else_branch: self.boxed(else_branch, depth)?,
        })
    }

    fn call<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let name = self.slot_any(node, &["function", "name"])?.text(self.source);
        let mut arguments = Vec::new();
        if let Some(list) = node.child_by_field_name("arguments") {
            for argument in list.significant_children() {
                arguments.push(self.argument(argument, depth)?);
            }
        }
        Ok(Expression::FunctionCall { name, arguments })
    }

    fn argument<N: CstNode>(&self, node: N, depth: usize) -> Result<Argument, ExpressionError> {
        if node.cst_kind() != CstKind::Argument {
            return Ok(Argument::positional(self.lower_at(node, depth + 1)?));
        }
        let name = node
            .child_by_field_name("name")
            .map(|n| n.text(self.source));
        let value = node
            .child_by_field_name("value")
            .or_else(|| node.significant_children().pop())
            .ok_or_else(|| ExpressionError::MissingSlot {
                kind: node.kind().to_string(),
                slot: "value",
            })?;
        Ok(Argument {
            name,
            value: self.lower_at(value, depth + 1)?,
        })
    }

    fn let_expression<N: CstNode>(&self, node: N, depth: usize) -> Lowered {
        let mut assignments = Vec::new();
        for child in node.significant_children() {
            if !matches!(
                child.cst_kind(),
                CstKind::LetAssignment | CstKind::AssignmentStatement
            ) {
                continue;
            }
            let name = self.slot(child, "name")?.text(self.source);
            let value = self.lower_at(self.slot(child, "value")?, depth + 1)?;
            assignments.push((name, value));
        }
        Ok(Expression::Let {
            assignments,
            body: self.boxed(self.slot(node, "body")?, depth)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::builder::*;
    use crate::cst::SerializedNode;

    fn lower(node: SerializedNode) -> Lowered {
        let node = finish(node);
        ExpressionBuilder::new(&node.text).lower(&node)
    }

    #[test]
    fn test_literals_and_variables() {
        assert_eq!(lower(number("3")), Ok(Expression::number(3.0)));
        assert_eq!(
            lower(string("hi")),
            Ok(Expression::Literal(Literal::String("hi".into())))
        );
        assert_eq!(lower(ident("w")), Ok(Expression::variable("w")));
        assert_eq!(lower(special("$t")), Ok(Expression::variable("$t")));
        assert_eq!(
            lower(ident("false")),
            Ok(Expression::Literal(Literal::Boolean(false)))
        );
    }

    #[test]
    fn test_binary_precedence_tree_is_preserved() {
        // 1 + (2 * x)
        let node = binary(number("1"), "+", binary(number("2"), "*", ident("x")));
        let expected = Expression::Binary {
            op: BinaryOp::Add,
            left: Box::new(Expression::number(1.0)),
            right: Box::new(Expression::Binary {
                op: BinaryOp::Multiply,
                left: Box::new(Expression::number(2.0)),
                right: Box::new(Expression::variable("x")),
            }),
        };
        assert_eq!(lower(node), Ok(expected));
    }

    #[test]
    fn test_unknown_operator_fails() {
        let node = binary(number("1"), "<>", number("2"));
        assert_eq!(lower(node), Err(ExpressionError::UnknownOperator("<>".into())));
    }

    #[test]
    fn test_unary_not() {
        let node = unary("!", ident("flag"));
        assert_eq!(
            lower(node),
            Ok(Expression::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expression::variable("flag")),
            })
        );
    }

    #[test]
    fn test_conditional_fielded_and_positional_agree() {
        let fielded = lower(conditional(ident("c"), number("1"), number("2")));
        let positional = lower(conditional_positional(ident("c"), number("1"), number("2")));
        assert!(fielded.is_ok());
        assert_eq!(fielded, positional);
    }

    #[test]
    fn test_conditional_missing_branch_fails() {
        let node = node(
            "conditional_expression",
            vec![ident("c"), token("?"), number("1")],
        );
        assert!(matches!(
            lower(node),
            Err(ExpressionError::MissingSlot { .. })
        ));
    }

    #[test]
    fn test_failing_slot_fails_whole_expression() {
        let node = binary(ident("a"), "+", binary(number("1"), "<>", number("2")));
        assert!(lower(node).is_err());
    }

    #[test]
    fn test_function_call_with_named_argument() {
        let node = call("max", vec![arg(number("1")), named_arg("b", ident("y"))]);
        assert_eq!(
            lower(node),
            Ok(Expression::FunctionCall {
                name: "max".into(),
                arguments: vec![
                    Argument::positional(Expression::number(1.0)),
                    Argument::named("b", Expression::variable("y")),
                ],
            })
        );
    }

    #[test]
    fn test_array_range_index_member() {
        let array_node = array(vec![number("1"), ident("x")]);
        assert_eq!(
            lower(array_node),
            Ok(Expression::Array(vec![
                Expression::number(1.0),
                Expression::variable("x")
            ]))
        );

        let range_node = range(number("0"), None, ident("n"));
        assert!(matches!(lower(range_node), Ok(Expression::Range { step: None, .. })));

        let index_node = index(ident("v"), number("0"));
        assert!(matches!(lower(index_node), Ok(Expression::Index { .. })));

        let member_node = member(ident("p"), "x");
        assert_eq!(
            lower(member_node),
            Ok(Expression::Member {
                object: Box::new(Expression::variable("p")),
                member: "x".into(),
            })
        );
    }

    #[test]
    fn test_let_expression() {
        let node = let_expression(
            vec![let_assignment("a", number("2"))],
            binary(ident("a"), "*", ident("a")),
        );
        match lower(node) {
            Ok(Expression::Let { assignments, .. }) => {
                assert_eq!(assignments, vec![("a".to_string(), Expression::number(2.0))]);
            }
            other => panic!("Expected Let, got {other:?}"),
        }
    }

    #[test]
    fn test_parentheses_are_transparent() {
        assert_eq!(lower(paren(paren(ident("z")))), Ok(Expression::variable("z")));
    }

    #[test]
    fn test_unresolved_fallback_keeps_text() {
        let node = finish(binary(number("1"), "<>", number("2")));
        let expression = ExpressionBuilder::new(&node.text)
            .lower_or_unresolved(&node)
            .unwrap();
        assert_eq!(expression, Expression::Unresolved("1 <> 2".into()));
    }

    #[test]
    fn test_too_deep_escalates() {
        let mut node = number("1");
        for _ in 0..10 {
            node = unary("-", node);
        }
        let node = finish(node);
        let builder = ExpressionBuilder::new(&node.text).with_max_depth(4);
        assert!(matches!(
            builder.lower(&node),
            Err(ExpressionError::TooDeep { limit: 4, .. })
        ));
        assert!(matches!(
            builder.lower_or_unresolved(&node),
            Err(GenerateError::TooDeeplyNested { limit: 4, .. })
        ));
    }
}
