//! # Call Dispatch
//!
//! Every `name(args) ...` statement is offered to the registered builder
//! families in priority order. The first family that recognizes the name
//! builds the node; unrecognized names become
//! [`AstNode::ModuleInstantiation`], since they may refer to modules defined
//! elsewhere.

use std::fmt;

use tracing::{debug, trace};

use super::builders::{CsgBuilder, ModuleBuilder, PrimitiveBuilder, TransformBuilder};
use crate::ast::{AstNode, Parameter, ParameterValue};
use crate::error::GenerateError;
use crate::location::SourceLocation;

/// A module call with its arguments already bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Call<'a> {
    pub name: &'a str,
    pub arguments: Vec<Parameter>,
    pub location: SourceLocation,
}

impl<'a> Call<'a> {
    /// Arguments in source order, keyed by parameter name.
    ///
    /// Positional arguments take the name of the slot at their position in
    /// `positional`; surplus positionals are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::generator::Call;
    /// use openscad_ast::{Parameter, ParameterValue, SourceLocation};
    ///
    /// let call = Call {
    ///     name: "cube",
    ///     arguments: vec![
    ///         Parameter::positional(ParameterValue::Number(10.0)),
    ///         Parameter::named("center", ParameterValue::Boolean(true)),
    ///     ],
    ///     location: SourceLocation::zero(),
    /// };
    /// let names: Vec<&str> = call.slots(&["size", "center"]).map(|(name, _)| name).collect();
    /// assert_eq!(names, ["size", "center"]);
    /// ```
    pub fn slots<'p>(
        &'p self,
        positional: &'p [&'static str],
    ) -> impl Iterator<Item = (&'p str, &'p ParameterValue)> + 'p {
        let mut index = 0;
        self.arguments.iter().filter_map(move |parameter| match &parameter.name {
            Some(name) => Some((name.as_str(), &parameter.value)),
            None => {
                let slot = positional.get(index).copied();
                index += 1;
                if slot.is_none() {
                    debug!(call = self.name, position = index, "surplus positional argument");
                }
                slot.map(|slot| (slot, &parameter.value))
            }
        })
    }

    /// Logs an argument the builder does not use.
    pub fn ignore(&self, slot: &str, value: &ParameterValue) {
        debug!(
            call = self.name,
            argument = slot,
            found = value.describe(),
            "ignoring argument"
        );
    }
}

/// Source of a call's child statements.
///
/// Children are generated lazily: leaf builders never ask, so a primitive
/// does not swallow the statement that follows it.
pub trait ChildSource {
    fn children(&mut self) -> Result<Vec<AstNode>, GenerateError>;
}

/// No children; for calls built outside a CST walk.
#[derive(Debug, Default)]
pub struct NoChildren;

impl ChildSource for NoChildren {
    fn children(&mut self) -> Result<Vec<AstNode>, GenerateError> {
        Ok(Vec::new())
    }
}

/// One family of node builders.
pub trait NodeBuilder: Send + Sync {
    /// Family name, for logs.
    fn family(&self) -> &'static str;

    /// Whether this family builds calls named `name`.
    fn claims(&self, name: &str) -> bool;

    /// Builds the node for a claimed call.
    ///
    /// `Ok(None)` means the call could not be assembled and the statement is
    /// skipped.
    fn build(
        &self,
        call: Call<'_>,
        body: &mut dyn ChildSource,
    ) -> Result<Option<AstNode>, GenerateError>;
}

/// Builder families tried in registration order.
pub struct CompositeDispatcher {
    builders: Vec<Box<dyn NodeBuilder>>,
}

impl CompositeDispatcher {
    /// Primitive, Transform, CSG, then Module/Function.
    pub fn standard() -> Self {
        Self {
            builders: vec![
                Box::new(PrimitiveBuilder),
                Box::new(TransformBuilder),
                Box::new(CsgBuilder),
                Box::new(ModuleBuilder),
            ],
        }
    }

    /// Appends a family after the registered ones.
    pub fn with_builder(mut self, builder: Box<dyn NodeBuilder>) -> Self {
        self.builders.push(builder);
        self
    }

    /// Builds the node for `call`.
    pub fn dispatch(
        &self,
        call: Call<'_>,
        body: &mut dyn ChildSource,
    ) -> Result<Option<AstNode>, GenerateError> {
        if let Some(builder) = self.builders.iter().find(|b| b.claims(call.name)) {
            trace!(family = builder.family(), call = call.name, "dispatching call");
            return builder.build(call, body);
        }
        trace!(call = call.name, "no builder claims call, keeping it as an instantiation");
        Ok(Some(AstNode::ModuleInstantiation {
            name: call.name.to_string(),
            children: body.children()?,
            arguments: call.arguments,
            location: call.location,
        }))
    }
}

impl Default for CompositeDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CompositeDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.builders.iter().map(|b| b.family()))
            .finish()
    }
}
