//! Boolean operations. Children keep their source order, which matters for
//! `difference` (the first child is the base).

use crate::ast::AstNode;
use crate::error::GenerateError;
use crate::generator::dispatch::{Call, ChildSource, NodeBuilder};

const OPERATIONS: &[&str] = &["union", "difference", "intersection", "hull", "minkowski"];

/// Builds `union`, `difference`, `intersection`, `hull` and `minkowski`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgBuilder;

impl NodeBuilder for CsgBuilder {
    fn family(&self) -> &'static str {
        "csg"
    }

    fn claims(&self, name: &str) -> bool {
        OPERATIONS.contains(&name)
    }

    fn build(
        &self,
        call: Call<'_>,
        body: &mut dyn ChildSource,
    ) -> Result<Option<AstNode>, GenerateError> {
        for (slot, value) in call.slots(&[]) {
            call.ignore(slot, value);
        }

        let children = body.children()?;
        let location = call.location;
        Ok(Some(match call.name {
            "union" => AstNode::Union { children, location },
            "difference" => AstNode::Difference { children, location },
            "intersection" => AstNode::Intersection { children, location },
            "hull" => AstNode::Hull { children, location },
            "minkowski" => AstNode::Minkowski { children, location },
            _ => return Ok(None),
        }))
    }
}
