//! # Argument Binding
//!
//! Classifies each argument of a call as named or positional and resolves
//! its value. The binder knows nothing about the callee; giving positional
//! slots a meaning is left to the node builders.
//!
//! ## CST Structure
//!
//! ```text
//! arguments
//! ├── (
//! ├── argument
//! │   └── value: number "10"
//! ├── ,
//! ├── argument
//! │   ├── name: identifier "center"
//! │   ├── =
//! │   └── value: boolean "true"
//! └── )
//! ```

use tracing::{debug, warn};

use super::expressions::ExpressionBuilder;
use super::extract::ValueExtractor;
use crate::ast::{Expression, Parameter, ParameterValue};
use crate::cst::{CstKind, CstNode};
use crate::error::GenerateError;

/// Turns argument lists into ordered [`Parameter`]s.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentBinder<'a, 's> {
    values: &'a ValueExtractor<'s>,
    expressions: &'a ExpressionBuilder<'s>,
    source: &'s str,
}

impl<'a, 's> ArgumentBinder<'a, 's> {
    pub fn new(
        values: &'a ValueExtractor<'s>,
        expressions: &'a ExpressionBuilder<'s>,
        source: &'s str,
    ) -> Self {
        Self {
            values,
            expressions,
            source,
        }
    }

    /// Binds every argument of `list`, preserving source order.
    ///
    /// A missing list binds to no parameters.
    pub fn bind<N: CstNode>(&self, list: Option<N>) -> Result<Vec<Parameter>, GenerateError> {
        let Some(list) = list else {
            return Ok(Vec::new());
        };
        let mut parameters = Vec::new();
        for child in list.significant_children() {
            match child.cst_kind() {
                CstKind::Error => {
                    warn!(text = %child.text(self.source), "skipping malformed argument");
                }
                CstKind::Argument | CstKind::AssignmentStatement => {
                    if let Some(parameter) = self.argument(child)? {
                        parameters.push(parameter);
                    }
                }
                _ => parameters.push(Parameter::positional(self.resolve(child)?)),
            }
        }
        Ok(parameters)
    }

    fn argument<N: CstNode>(&self, node: N) -> Result<Option<Parameter>, GenerateError> {
        let name = node.child_by_field_name("name");
        let value = match name {
            Some(_) => node.child_by_field_name("value").or_else(|| {
                let mut children = node.significant_children();
                if children.len() >= 2 {
                    children.pop()
                } else {
                    None
                }
            }),
            None => node
                .child_by_field_name("value")
                .or_else(|| node.sole_child()),
        };
        let Some(value) = value else {
            debug!(text = %node.text(self.source), "argument without a value");
            return Ok(None);
        };
        Ok(Some(Parameter {
            name: name.map(|n| n.text(self.source)),
            value: self.resolve(value)?,
        }))
    }

    /// Resolves one value subtree.
    ///
    /// Literal extraction is tried first, then expression lowering; if both
    /// give up, the raw text is kept as [`ParameterValue::Unresolved`].
    pub fn resolve<N: CstNode>(&self, node: N) -> Result<ParameterValue, GenerateError> {
        if let Some(value) = self.values.value(node) {
            return Ok(value);
        }
        Ok(match self.expressions.lower_or_unresolved(node)? {
            Expression::Unresolved(text) => ParameterValue::Unresolved(text),
            expression => ParameterValue::Expression(expression),
        })
    }
}
