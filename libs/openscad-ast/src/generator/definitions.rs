//! Module and function definitions.

use tracing::debug;

use super::AstGenerator;
use crate::ast::{AstNode, ModuleParameter};
use crate::cst::{CstKind, CstNode};
use crate::error::GenerateError;
use crate::location::SourceLocation;

impl<'s> AstGenerator<'s> {
    /// `module name(params) body`.
    pub(super) fn module_definition<N: CstNode>(
        &mut self,
        node: N,
    ) -> Result<Option<AstNode>, GenerateError> {
        let Some(name) = node.child_by_field_name("name") else {
            debug!(text = %node.text(self.source), "module definition without a name");
            return Ok(None);
        };
        let parameters = self.parameters(node.child_by_field_name("parameters"))?;
        let body = match node.child_by_field_name("body") {
            Some(body) => self.body(body)?,
            None => Vec::new(),
        };

        Ok(Some(AstNode::ModuleDefinition {
            name: name.text(self.source),
            parameters,
            body,
            location: SourceLocation::from_node(&node),
        }))
    }

    /// `function name(params) = expr;`.
    pub(super) fn function_definition<N: CstNode>(
        &mut self,
        node: N,
    ) -> Result<Option<AstNode>, GenerateError> {
        let (Some(name), Some(value)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) else {
            debug!(text = %node.text(self.source), "function definition without a name or value");
            return Ok(None);
        };
        let parameters = self.parameters(node.child_by_field_name("parameters"))?;

        Ok(Some(AstNode::FunctionDefinition {
            name: name.text(self.source),
            parameters,
            expression: self.expressions.lower_or_unresolved(value)?,
            location: SourceLocation::from_node(&node),
        }))
    }

    /// Declared parameters with their optional defaults.
    ///
    /// Accepts `parameter` nodes, bare identifiers and `name = value`
    /// assignments, since grammars differ on how they wrap each entry.
    fn parameters<N: CstNode>(
        &self,
        list: Option<N>,
    ) -> Result<Vec<ModuleParameter>, GenerateError> {
        let Some(list) = list else {
            return Ok(Vec::new());
        };
        let mut parameters = Vec::new();
        for child in list.significant_children() {
            let (name, default) = match child.cst_kind() {
                CstKind::Identifier | CstKind::SpecialVariable => (Some(child), None),
                CstKind::Parameter | CstKind::AssignmentStatement | CstKind::Argument => (
                    child.child_by_field_name("name").or_else(|| {
                        child
                            .significant_children()
                            .into_iter()
                            .find(|c| c.cst_kind() == CstKind::Identifier)
                    }),
                    child
                        .child_by_field_name("default_value")
                        .or_else(|| child.child_by_field_name("value")),
                ),
                _ => {
                    debug!(kind = child.kind(), "skipping parameter");
                    continue;
                }
            };
            let Some(name) = name else {
                continue;
            };
            let default_value = match default {
                Some(value) => Some(self.binder().resolve(value)?),
                None => None,
            };
            parameters.push(ModuleParameter {
                name: name.text(self.source),
                default_value,
            });
        }
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expression, ParameterValue};
    use crate::cst::builder::*;
    use crate::cst::SerializedNode;

    fn generate(statement: SerializedNode) -> AstNode {
        let root = source_file(vec![statement]);
        let mut nodes = AstGenerator::new(&root.text).generate(&root).unwrap();
        assert_eq!(nodes.len(), 1, "{nodes:?}");
        nodes.remove(0)
    }

    #[test]
    fn test_module_definition_with_defaults() {
        let node = generate(module_definition(
            "peg",
            vec![parameter("h", Some(number("5"))), parameter("r", None)],
            block(vec![module_call("cylinder", vec![named_arg("h", ident("h"))])]),
        ));
        match node {
            AstNode::ModuleDefinition {
                name,
                parameters,
                body,
                ..
            } => {
                assert_eq!(name, "peg");
                assert_eq!(
                    parameters,
                    vec![
                        ModuleParameter {
                            name: "h".into(),
                            default_value: Some(ParameterValue::Number(5.0)),
                        },
                        ModuleParameter {
                            name: "r".into(),
                            default_value: None,
                        },
                    ]
                );
                assert!(matches!(body[..], [AstNode::Cylinder { .. }]));
            }
            other => panic!("Expected ModuleDefinition, got {other:?}"),
        }
    }

    #[test]
    fn test_module_body_is_not_instantiated_at_top_level() {
        let root = source_file(vec![
            module_definition("m", vec![], block(vec![module_call("cube", vec![])])),
            module_call("m", vec![]),
        ]);
        let nodes = AstGenerator::new(&root.text).generate(&root).unwrap();
        assert!(matches!(
            &nodes[..],
            [AstNode::ModuleDefinition { .. }, AstNode::ModuleInstantiation { name, .. }] if name == "m"
        ));
    }

    #[test]
    fn test_function_definition() {
        let node = generate(function_definition(
            "double",
            vec![parameter("x", None)],
            binary(ident("x"), "*", number("2")),
        ));
        match node {
            AstNode::FunctionDefinition {
                name,
                parameters,
                expression,
                ..
            } => {
                assert_eq!(name, "double");
                assert_eq!(parameters.len(), 1);
                assert_eq!(
                    expression,
                    Expression::Binary {
                        op: BinaryOp::Multiply,
                        left: Box::new(Expression::variable("x")),
                        right: Box::new(Expression::number(2.0)),
                    }
                );
            }
            other => panic!("Expected FunctionDefinition, got {other:?}"),
        }
    }
}
