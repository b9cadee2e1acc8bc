//! Built-in modules that are neither shapes nor transforms: `children`,
//! `echo` and `assert`.

use crate::ast::{AstNode, ParameterValue};
use crate::error::GenerateError;
use crate::generator::dispatch::{Call, ChildSource, NodeBuilder};

/// Builds `children`, `echo` and `assert`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleBuilder;

impl NodeBuilder for ModuleBuilder {
    fn family(&self) -> &'static str {
        "module"
    }

    fn claims(&self, name: &str) -> bool {
        matches!(name, "children" | "echo" | "assert")
    }

    fn build(
        &self,
        call: Call<'_>,
        body: &mut dyn ChildSource,
    ) -> Result<Option<AstNode>, GenerateError> {
        let node = match call.name {
            "children" => {
                let mut index = None;
                for (slot, value) in call.slots(&["index"]) {
                    match (slot, value) {
                        ("index", ParameterValue::Undefined) => index = None,
                        ("index", other) => index = Some(other.clone()),
                        (_, other) => call.ignore(slot, other),
                    }
                }
                AstNode::Children {
                    index,
                    location: call.location,
                }
            }
            // `echo(...)` and `assert(...)` may guard a following statement
            "echo" => AstNode::Echo {
                children: body.children()?,
                arguments: call.arguments,
                location: call.location,
            },
            "assert" => AstNode::Assert {
                children: body.children()?,
                arguments: call.arguments,
                location: call.location,
            },
            _ => return Ok(None),
        };
        Ok(Some(node))
    }
}
