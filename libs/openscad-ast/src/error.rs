//! # Generator Errors
//!
//! Most failures while lowering a CST are recovered on the spot: a value
//! that cannot be extracted falls back to a default, a statement that cannot
//! be built is skipped. The errors here are the ones that reach the caller.

use thiserror::Error;

use crate::location::SourceLocation;
use crate::special_vars::SpecialShape;

/// Hard failures of AST generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A `$`-prefixed variable was assigned a value of the wrong shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::cst::builder::*;
    /// use openscad_ast::{parse_from_cst, GenerateError};
    ///
    /// let root = source_file(vec![assignment("$vpr", array(vec![number("1"), number("2")]))]);
    /// let err = parse_from_cst(&root).unwrap_err();
    /// assert!(matches!(err, GenerateError::InvalidSpecialVariable { ref name, .. } if name == "$vpr"));
    /// ```
    #[error("invalid value for special variable `{name}`: expected {expected}, found {found}")]
    InvalidSpecialVariable {
        name: String,
        expected: SpecialShape,
        found: String,
        location: SourceLocation,
    },

    /// Statements or expressions nest deeper than the configured limit.
    #[error("source is too deeply nested (limit is {limit} levels)")]
    TooDeeplyNested {
        limit: usize,
        location: SourceLocation,
    },

    /// A JSON tree from web-tree-sitter did not deserialize.
    #[error("invalid serialized CST: {0}")]
    InvalidCst(#[from] serde_json::Error),
}

/// Reasons an expression subtree failed to lower.
///
/// Only [`ExpressionError::TooDeep`] escapes the generator, as
/// [`GenerateError::TooDeeplyNested`]; every other variant is replaced by an
/// unresolved expression at the call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("`{kind}` has no `{slot}`")]
    MissingSlot { kind: String, slot: &'static str },

    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),

    #[error("`{0}` is not an expression")]
    Unsupported(String),

    #[error("expression nested deeper than {limit} levels")]
    TooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ExpressionError {
    /// The hard error for this failure, if it must reach the caller.
    pub fn escalate(&self) -> Option<GenerateError> {
        match self {
            Self::TooDeep { limit, location } => Some(GenerateError::TooDeeplyNested {
                limit: *limit,
                location: *location,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_depth_escalates() {
        let too_deep = ExpressionError::TooDeep {
            limit: 4,
            location: SourceLocation::zero(),
        };
        assert!(matches!(
            too_deep.escalate(),
            Some(GenerateError::TooDeeplyNested { limit: 4, .. })
        ));
        assert!(ExpressionError::UnknownOperator("<>".into()).escalate().is_none());
    }

    #[test]
    fn test_special_variable_message_names_variable_and_shape() {
        let err = GenerateError::InvalidSpecialVariable {
            name: "$vpr".into(),
            expected: SpecialShape::Vector3,
            found: "a 2-component vector".into(),
            location: SourceLocation::zero(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for special variable `$vpr`: expected a 3-component vector, found a 2-component vector"
        );
    }
}
