//! `if`, `for`, `let` and `each` statements.

use std::collections::BTreeMap;

use tracing::debug;

use super::{unwrap_statement, AstGenerator};
use crate::ast::{AstNode, ForVariable, Iterable};
use crate::cst::{CstKind, CstNode};
use crate::error::GenerateError;
use crate::location::SourceLocation;

impl<'s> AstGenerator<'s> {
    /// `if (c) a else b`. An `else if` alternative nests as a single `If`
    /// in the else branch.
    pub(super) fn if_statement<N: CstNode>(
        &mut self,
        node: N,
    ) -> Result<Option<AstNode>, GenerateError> {
        let positional = node.significant_children();
        let field_or = |field: &str, index: usize| {
            node.child_by_field_name(field)
                .or_else(|| positional.get(index).copied())
        };

        let Some(condition) = field_or("condition", 0) else {
            debug!(text = %node.text(self.source), "if without condition");
            return Ok(None);
        };
        let consequence = field_or("consequence", 1);
        let alternative = field_or("alternative", 2);

        let condition = self.expressions.lower_or_unresolved(condition)?;
        let then_branch = match consequence {
            Some(body) => self.body(body)?,
            None => Vec::new(),
        };
        let else_branch = match alternative.map(unwrap_statement) {
            Some(alt) if alt.cst_kind() == CstKind::IfStatement => {
                Some(self.statement(alt, &[])?.0.into_iter().collect())
            }
            Some(alt) => Some(self.body(alt)?),
            None => None,
        };

        Ok(Some(AstNode::If {
            condition,
            then_branch,
            else_branch,
            location: SourceLocation::from_node(&node),
        }))
    }

    /// `for (i = [0:10], j = list) body`.
    pub(super) fn for_statement<N: CstNode>(
        &mut self,
        node: N,
    ) -> Result<Option<AstNode>, GenerateError> {
        let mut bindings: Vec<(N, N)> = Vec::new();
        for binding in node.significant_children() {
            if binding.cst_kind() != CstKind::ForBinding {
                continue;
            }
            match (
                binding.child_by_field_name("iterator"),
                binding.child_by_field_name("range"),
            ) {
                (Some(iterator), Some(range)) => bindings.push((iterator, range)),
                _ => debug!(text = %binding.text(self.source), "incomplete for binding"),
            }
        }
        if bindings.is_empty() {
            if let (Some(iterator), Some(range)) = (
                node.child_by_field_name("iterator"),
                node.child_by_field_name("range"),
            ) {
                bindings.push((iterator, range));
            }
        }
        if bindings.is_empty() {
            debug!(text = %node.text(self.source), "for without iterator or range");
            return Ok(None);
        }

        let mut variables = Vec::with_capacity(bindings.len());
        for (iterator, range) in bindings {
            variables.push(self.for_variable(iterator, range)?);
        }

        let body = node.child_by_field_name("body").or_else(|| {
            node.significant_children()
                .into_iter()
                .filter(|c| c.cst_kind() != CstKind::ForBinding)
                .last()
        });
        let body = match body {
            Some(body) => self.body(body)?,
            None => Vec::new(),
        };

        Ok(Some(AstNode::ForLoop {
            variables,
            body,
            location: SourceLocation::from_node(&node),
        }))
    }

    /// A structural range stays numeric; anything else is an iterable
    /// expression with no step.
    fn for_variable<N: CstNode>(&self, iterator: N, range: N) -> Result<ForVariable, GenerateError> {
        let variable = iterator.text(self.source);
        if let Some(numeric) = self.values.range(range) {
            return Ok(ForVariable {
                variable,
                iterable: Iterable::Range(numeric),
                step: numeric.step,
            });
        }
        Ok(ForVariable {
            variable,
            iterable: Iterable::Expression(self.expressions.lower_or_unresolved(range)?),
            step: None,
        })
    }

    /// `let (a = 1, b = a + 1) body`.
    pub(super) fn let_statement<N: CstNode>(
        &mut self,
        node: N,
    ) -> Result<Option<AstNode>, GenerateError> {
        let mut assignments = BTreeMap::new();
        for child in node.significant_children() {
            if !matches!(
                child.cst_kind(),
                CstKind::LetAssignment | CstKind::AssignmentStatement
            ) {
                continue;
            }
            let (Some(name), Some(value)) = (
                child.child_by_field_name("name"),
                child.child_by_field_name("value"),
            ) else {
                debug!(text = %child.text(self.source), "incomplete let assignment");
                continue;
            };
            let value = self.binder().resolve(value)?;
            assignments.insert(name.text(self.source), value);
        }

        let body = match node.child_by_field_name("body") {
            Some(body) => self.body(body)?,
            None => Vec::new(),
        };

        Ok(Some(AstNode::Let {
            assignments,
            body,
            location: SourceLocation::from_node(&node),
        }))
    }

    /// `each expr` inside list comprehensions.
    pub(super) fn each_statement<N: CstNode>(
        &mut self,
        node: N,
    ) -> Result<Option<AstNode>, GenerateError> {
        let Some(value) = node
            .child_by_field_name("value")
            .or_else(|| node.sole_child())
        else {
            return Ok(None);
        };
        Ok(Some(AstNode::Each {
            expression: self.expressions.lower_or_unresolved(value)?,
            location: SourceLocation::from_node(&node),
        }))
    }
}
