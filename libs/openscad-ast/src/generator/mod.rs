//! # AST Generator
//!
//! Walks a CST depth-first and produces the ordered top-level [`AstNode`]s.
//!
//! ## Pipeline
//!
//! ```text
//! CstNode ──→ ValueExtractor ───┐
//!        └──→ ExpressionBuilder ┴→ ArgumentBinder → CompositeDispatcher → NodeBuilder
//! ```
//!
//! Statements that cannot be assembled are skipped so that half-typed
//! source still yields the rest of its tree. Only special-variable
//! violations and excessive nesting abort generation.
//!
//! ## Call Bodies
//!
//! A call's children come from, in order of preference:
//!
//! 1. its `body` field (`translate(v) { ... }` or `translate(v) cube();`)
//! 2. the next sibling statement, when the call has no body and no `;`
//!
//! A sibling taken this way is consumed and not generated again.

mod arguments;
mod builders;
mod control_flow;
mod definitions;
mod dispatch;
mod expressions;
mod extract;

use std::sync::Arc;

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use config::limits::GeneratorLimits;
use tracing::{trace, warn};

pub use arguments::ArgumentBinder;
pub use builders::{CsgBuilder, ModuleBuilder, PrimitiveBuilder, TransformBuilder};
pub use dispatch::{Call, ChildSource, CompositeDispatcher, NoChildren, NodeBuilder};
pub use expressions::ExpressionBuilder;
pub use extract::ValueExtractor;

use crate::ast::{AstNode, Expression, Modifier, ParameterValue};
use crate::cst::{CstKind, CstNode};
use crate::error::GenerateError;
use crate::location::SourceLocation;
use crate::special_vars;

/// A built statement and the number of following siblings it consumed.
type Built = (Option<AstNode>, usize);

/// Lowers one CST into AST nodes.
///
/// # Example
///
/// ```rust
/// use openscad_ast::cst::builder::*;
/// use openscad_ast::generator::AstGenerator;
/// use openscad_ast::AstNode;
///
/// let root = source_file(vec![module_call("cube", vec![arg(number("10"))])]);
/// let nodes = AstGenerator::new(&root.text).generate(&root).unwrap();
/// assert!(matches!(nodes[..], [AstNode::Cube { .. }]));
/// ```
#[derive(Debug)]
pub struct AstGenerator<'s> {
    source: &'s str,
    limits: GeneratorLimits,
    values: ValueExtractor<'s>,
    expressions: ExpressionBuilder<'s>,
    dispatcher: Arc<CompositeDispatcher>,
    depth: usize,
}

impl<'s> AstGenerator<'s> {
    /// Creates a generator with the standard builders and default limits.
    pub fn new(source: &'s str) -> Self {
        Self::with_limits(source, GeneratorLimits::default())
    }

    /// Creates a generator with custom nesting limits.
    pub fn with_limits(source: &'s str, limits: GeneratorLimits) -> Self {
        Self {
            source,
            limits,
            values: ValueExtractor::new(source).with_max_depth(limits.max_depth),
            expressions: ExpressionBuilder::new(source).with_max_depth(limits.max_depth),
            dispatcher: Arc::new(CompositeDispatcher::standard()),
            depth: 0,
        }
    }

    /// Replaces the builder families calls are dispatched to.
    pub fn with_dispatcher(mut self, dispatcher: CompositeDispatcher) -> Self {
        self.dispatcher = Arc::new(dispatcher);
        self
    }

    /// Generates the top-level statements under `root`.
    ///
    /// `root` is normally a `source_file`; any other node is generated as a
    /// single statement.
    pub fn generate<N: CstNode>(&mut self, root: N) -> Result<Vec<AstNode>, GenerateError> {
        match root.cst_kind() {
            CstKind::SourceFile | CstKind::Block => self.statement_list(root),
            _ => Ok(self.statement(root, &[])?.0.into_iter().collect()),
        }
    }

    fn binder(&self) -> ArgumentBinder<'_, 's> {
        ArgumentBinder::new(&self.values, &self.expressions, self.source)
    }

    // ============ Statement Lists ============

    /// Generates every statement in `parent`, letting open calls consume
    /// the sibling that follows them.
    fn statement_list<N: CstNode>(&mut self, parent: N) -> Result<Vec<AstNode>, GenerateError> {
        let children = parent.significant_children();
        let mut nodes = Vec::with_capacity(children.len());
        let mut index = 0;
        while let Some(&child) = children.get(index) {
            let (built, consumed) = self.statement(child, &children[index + 1..])?;
            match built {
                Some(node) => nodes.push(node),
                None if !child.cst_kind().is_trivia() => {
                    warn!(kind = child.kind(), text = %child.text(self.source), "statement produced no node");
                }
                None => {}
            }
            index += 1 + consumed;
        }
        Ok(nodes)
    }

    /// Children of a control structure or definition.
    ///
    /// A block yields its statements; a single statement yields itself.
    fn body<N: CstNode>(&mut self, node: N) -> Result<Vec<AstNode>, GenerateError> {
        let node = unwrap_statement(node);
        if node.cst_kind() == CstKind::Block {
            return self.statement_list(node);
        }
        Ok(self.statement(node, &[])?.0.into_iter().collect())
    }

    // ============ Statements ============

    /// Generates one statement.
    ///
    /// `rest` holds the siblings after `node`; the returned count says how
    /// many of them the statement consumed as its body.
    fn statement<N: CstNode>(&mut self, node: N, rest: &[N]) -> Result<Built, GenerateError> {
        if self.depth >= self.limits.max_depth {
            return Err(GenerateError::TooDeeplyNested {
                limit: self.limits.max_depth,
                location: SourceLocation::from_node(&node),
            });
        }
        self.depth += 1;
        let built = stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.statement_kind(node, rest)
        });
        self.depth -= 1;
        built
    }

    fn statement_kind<N: CstNode>(&mut self, node: N, rest: &[N]) -> Result<Built, GenerateError> {
        let location = SourceLocation::from_node(&node);
        let single = |node: Option<AstNode>| -> Result<Built, GenerateError> { Ok((node, 0)) };

        match node.cst_kind() {
            CstKind::Statement => match node.sole_child() {
                Some(inner) => self.statement(inner, rest),
                None => single(None),
            },
            CstKind::ModuleInstantiation => self.instantiation(node, rest),
            CstKind::AssignmentStatement => single(self.assignment(node)?),
            CstKind::IfStatement => single(self.if_statement(node)?),
            CstKind::ForStatement => single(self.for_statement(node)?),
            CstKind::LetStatement => single(self.let_statement(node)?),
            CstKind::EachStatement => single(self.each_statement(node)?),
            CstKind::ModuleDefinition => single(self.module_definition(node)?),
            CstKind::FunctionDefinition => single(self.function_definition(node)?),
            CstKind::IncludeStatement => single(self.path(node).map(|path| AstNode::Include { path, location })),
            CstKind::UseStatement => single(self.path(node).map(|path| AstNode::Use { path, location })),
            CstKind::ModifiedStatement => self.modified(node, rest),
            CstKind::Block => single(Some(AstNode::Union {
                children: self.statement_list(node)?,
                location,
            })),
            CstKind::Error => {
                warn!(text = %node.text(self.source), "skipping malformed statement");
                single(None)
            }
            CstKind::Comment => single(None),
            kind => {
                trace!(?kind, "not a statement");
                single(None)
            }
        }
    }

    /// `name(args)` with an optional body.
    fn instantiation<N: CstNode>(&mut self, node: N, rest: &[N]) -> Result<Built, GenerateError> {
        let name_node = node.child_by_field_name("name").or_else(|| {
            node.significant_children()
                .into_iter()
                .find(|c| c.cst_kind() == CstKind::Identifier)
        });
        let Some(name_node) = name_node else {
            return Ok((None, 0));
        };
        let name = name_node.text(self.source);

        let argument_list = node.child_by_field_name("arguments").or_else(|| {
            node.significant_children()
                .into_iter()
                .find(|c| c.cst_kind() == CstKind::Arguments)
        });
        let arguments = self.binder().bind(argument_list)?;

        let call = Call {
            name: &name,
            arguments,
            location: SourceLocation::from_node(&node),
        };
        let dispatcher = Arc::clone(&self.dispatcher);
        let mut body = CallBody {
            generator: self,
            call: node,
            rest,
            consumed: 0,
        };
        let built = dispatcher.dispatch(call, &mut body)?;
        Ok((built, body.consumed))
    }

    /// `name = value;`, validating `$` variables.
    fn assignment<N: CstNode>(&mut self, node: N) -> Result<Option<AstNode>, GenerateError> {
        let mut children = node.significant_children().into_iter();
        let name = node.child_by_field_name("name").or_else(|| children.next());
        let value = node.child_by_field_name("value").or_else(|| children.last());
        let (Some(name), Some(value)) = (name, value) else {
            return Ok(None);
        };

        let name = name.text(self.source);
        let location = SourceLocation::from_node(&node);
        let value = if name.starts_with('$') {
            self.special_value(&name, value, location)?
        } else {
            self.binder().resolve(value)?
        };
        Ok(Some(AstNode::Assignment {
            name,
            value,
            location,
        }))
    }

    /// Value of a `$` assignment, checked against the variable's rule.
    ///
    /// Vector folding drops non-numeric elements, so an array literal that
    /// does not fold to the same arity is kept as an expression and checked
    /// by its element count.
    fn special_value<N: CstNode>(
        &self,
        name: &str,
        node: N,
        location: SourceLocation,
    ) -> Result<ParameterValue, GenerateError> {
        let mut value = self.binder().resolve(node)?;
        if node.cst_kind() == CstKind::ArrayLiteral {
            if let Expression::Array(items) = self.expressions.lower_or_unresolved(node)? {
                let folded = match value {
                    ParameterValue::Vector2(_) => Some(2),
                    ParameterValue::Vector3(_) => Some(3),
                    _ => None,
                };
                if folded != Some(items.len()) {
                    value = ParameterValue::Expression(Expression::Array(items));
                }
            }
        }
        special_vars::validate(name, &value, location)?;
        Ok(value)
    }

    /// Path of `include <...>` or `use <...>`.
    fn path<N: CstNode>(&self, node: N) -> Option<String> {
        let path = node.child_by_field_name("path").or_else(|| node.sole_child())?;
        let text = path.text(self.source);
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .unwrap_or_else(|| extract::unquote(trimmed));
        Some(inner.to_string())
    }

    /// `! # % *` applied to the following statement.
    fn modified<N: CstNode>(&mut self, node: N, rest: &[N]) -> Result<Built, GenerateError> {
        let modifier = node
            .child_by_field_name("modifier")
            .or_else(|| node.children().into_iter().find(|c| !c.is_named()))
            .and_then(|m| Modifier::from_symbol(m.text(self.source).trim()));
        let target = node.child_by_field_name("statement").or_else(|| node.sole_child());
        let (Some(modifier), Some(target)) = (modifier, target) else {
            return Ok((None, 0));
        };

        let (child, consumed) = self.statement(target, rest)?;
        Ok((
            child.map(|child| AstNode::Modified {
                modifier,
                child: Box::new(child),
                location: SourceLocation::from_node(&node),
            }),
            consumed,
        ))
    }
}

/// Strips `statement` wrappers around a single child.
fn unwrap_statement<N: CstNode>(mut node: N) -> N {
    while node.cst_kind().is_statement_wrapper() {
        match node.sole_child() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

// ============ Call Bodies ============

/// Lazily generates the children of one call.
struct CallBody<'g, 's, 'r, N> {
    generator: &'g mut AstGenerator<'s>,
    call: N,
    rest: &'r [N],
    consumed: usize,
}

impl<N: CstNode> ChildSource for CallBody<'_, '_, '_, N> {
    fn children(&mut self) -> Result<Vec<AstNode>, GenerateError> {
        if let Some(body) = self.call.child_by_field_name("body") {
            return self.generator.body(body);
        }
        if self.call.has_terminator() || self.consumed > 0 {
            return Ok(Vec::new());
        }
        let rest = self.rest;
        let Some((&next, after)) = rest.split_first() else {
            return Ok(Vec::new());
        };
        let (child, consumed) = self.generator.statement(next, after)?;
        self.consumed = 1 + consumed;
        Ok(child.into_iter().collect())
    }
}
