//! Type rules for assignments to OpenSCAD special variables.
//!
//! `$fn = 32;` and friends are ordinary assignments syntactically, but the
//! language fixes the shape of each built-in special variable. Literal
//! values are checked here; symbolic ones pass through because checking
//! them would require evaluation.

use std::fmt;

use crate::ast::{Expression, ParameterValue};
use crate::error::GenerateError;
use crate::location::SourceLocation;

/// The shape a special variable must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialShape {
    Number,
    Boolean,
    Vector3,
}

impl fmt::Display for SpecialShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialShape::Number => write!(f, "a number"),
            SpecialShape::Boolean => write!(f, "a boolean"),
            SpecialShape::Vector3 => write!(f, "a 3-component vector"),
        }
    }
}

/// Built-in special variables and their shapes.
pub const SPECIAL_VARIABLES: &[(&str, SpecialShape)] = &[
    ("$fn", SpecialShape::Number),
    ("$fa", SpecialShape::Number),
    ("$fs", SpecialShape::Number),
    ("$t", SpecialShape::Number),
    ("$vpr", SpecialShape::Vector3),
    ("$vpt", SpecialShape::Vector3),
    ("$vpd", SpecialShape::Number),
    ("$vpf", SpecialShape::Number),
    ("$children", SpecialShape::Number),
    ("$preview", SpecialShape::Boolean),
];

/// The rule for `name`, if it is a built-in special variable.
///
/// # Example
///
/// ```rust
/// use openscad_ast::special_vars::{rule_for, SpecialShape};
///
/// assert_eq!(rule_for("$vpr"), Some(SpecialShape::Vector3));
/// assert_eq!(rule_for("$my_setting"), None);
/// ```
pub fn rule_for(name: &str) -> Option<SpecialShape> {
    SPECIAL_VARIABLES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, shape)| *shape)
}

/// Checks an assignment to `name` against its rule.
pub fn validate(
    name: &str,
    value: &ParameterValue,
    location: SourceLocation,
) -> Result<(), GenerateError> {
    let Some(expected) = rule_for(name) else {
        return Ok(());
    };

    let accepted = match (expected, value) {
        (_, ParameterValue::Undefined | ParameterValue::Unresolved(_)) => true,
        (SpecialShape::Number, ParameterValue::Number(_)) => true,
        (SpecialShape::Boolean, ParameterValue::Boolean(_)) => true,
        (SpecialShape::Vector3, ParameterValue::Vector3(_)) => true,
        (SpecialShape::Vector3, ParameterValue::Expression(Expression::Array(items))) => {
            items.len() == 3
        }
        (_, ParameterValue::Expression(Expression::Array(_))) => false,
        (_, ParameterValue::Expression(_)) => true,
        _ => false,
    };

    if accepted {
        Ok(())
    } else {
        Err(GenerateError::InvalidSpecialVariable {
            name: name.to_string(),
            expected,
            found: describe(value),
            location,
        })
    }
}

fn describe(value: &ParameterValue) -> String {
    match value {
        ParameterValue::Expression(Expression::Array(items)) => {
            format!("a {}-component vector", items.len())
        }
        other => other.describe().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};
    use rstest::rstest;

    fn check(name: &str, value: ParameterValue) -> Result<(), GenerateError> {
        validate(name, &value, SourceLocation::zero())
    }

    #[rstest]
    #[case("$fn", ParameterValue::Number(32.0))]
    #[case("$fa", ParameterValue::Number(6.0))]
    #[case("$t", ParameterValue::Number(0.5))]
    #[case("$vpr", ParameterValue::Vector3(DVec3::new(55.0, 0.0, 25.0)))]
    #[case("$vpt", ParameterValue::Expression(Expression::Array(vec![
        Expression::variable("x"),
        Expression::number(0.0),
        Expression::number(0.0),
    ])))]
    #[case("$preview", ParameterValue::Boolean(false))]
    #[case("$fn", ParameterValue::Expression(Expression::variable("quality")))]
    #[case("$fs", ParameterValue::Undefined)]
    #[case("$custom", ParameterValue::String("anything".into()))]
    fn test_accepts(#[case] name: &str, #[case] value: ParameterValue) {
        assert!(check(name, value).is_ok());
    }

    #[rstest]
    #[case("$vpr", ParameterValue::Vector2(DVec2::new(1.0, 2.0)), SpecialShape::Vector3)]
    #[case("$vpt", ParameterValue::Number(1.0), SpecialShape::Vector3)]
    #[case("$fn", ParameterValue::String("high".into()), SpecialShape::Number)]
    #[case("$fs", ParameterValue::Vector3(DVec3::ONE), SpecialShape::Number)]
    #[case("$preview", ParameterValue::Number(1.0), SpecialShape::Boolean)]
    fn test_rejects(#[case] name: &str, #[case] value: ParameterValue, #[case] shape: SpecialShape) {
        match check(name, value) {
            Err(GenerateError::InvalidSpecialVariable {
                name: reported,
                expected,
                ..
            }) => {
                assert_eq!(reported, name);
                assert_eq!(expected, shape);
            }
            other => panic!("Expected InvalidSpecialVariable, got {other:?}"),
        }
    }

    #[test]
    fn test_reports_array_arity() {
        let value = ParameterValue::Expression(Expression::Array(vec![
            Expression::variable("a"),
            Expression::variable("b"),
            Expression::variable("c"),
            Expression::variable("d"),
        ]));
        let err = check("$vpr", value).unwrap_err();
        assert!(err.to_string().contains("found a 4-component vector"));
    }
}
