//! Conversions from bound parameter values to typed node fields.
//!
//! Each helper returns `None` when the value has the wrong shape; builders
//! then log the argument as ignored and keep their default.

use glam::{DVec2, DVec3};

use crate::ast::{Expression, ParameterValue, Resolution, Value};

/// Number, or a symbolic expression to be evaluated later.
pub(crate) fn numeric(value: &ParameterValue) -> Option<Value<f64>> {
    match value {
        ParameterValue::Number(n) => Some(Value::Literal(*n)),
        other => symbolic(other),
    }
}

/// Expression-valued arguments carried through unevaluated.
pub(crate) fn symbolic<T>(value: &ParameterValue) -> Option<Value<T>> {
    match value {
        ParameterValue::Expression(expression) => Some(Value::Expression(expression.clone())),
        ParameterValue::Unresolved(text) => {
            Some(Value::Expression(Expression::Unresolved(text.clone())))
        }
        _ => None,
    }
}

pub(crate) fn boolean(value: &ParameterValue) -> Option<bool> {
    value.as_bool()
}

/// Non-negative whole number, e.g. convexity or slices.
pub(crate) fn count(value: &ParameterValue) -> Option<u32> {
    let n = value.as_number()?;
    (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}

pub(crate) fn string(value: &ParameterValue) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// A 2-vector; 3-vectors are not truncated.
pub(crate) fn vector2(value: &ParameterValue) -> Option<Value<DVec2>> {
    match value {
        ParameterValue::Vector2(v) => Some(Value::Literal(*v)),
        ParameterValue::Vector3(_) => None,
        other => symbolic(other),
    }
}

/// A 3-vector, padding a 2-vector's Z with `pad_z`.
pub(crate) fn vector3(value: &ParameterValue, pad_z: f64) -> Option<Value<DVec3>> {
    match value {
        ParameterValue::Vector3(v) => Some(Value::Literal(*v)),
        ParameterValue::Vector2(v) => Some(Value::Literal(v.extend(pad_z))),
        other => symbolic(other),
    }
}

/// A list of 2D points.
pub(crate) fn points2(value: &ParameterValue) -> Option<Value<Vec<DVec2>>> {
    rows(value, |row| match *row {
        [x, y] => Some(DVec2::new(x, y)),
        _ => None,
    })
}

/// A list of 3D points.
pub(crate) fn points3(value: &ParameterValue) -> Option<Value<Vec<DVec3>>> {
    rows(value, |row| match *row {
        [x, y, z] => Some(DVec3::new(x, y, z)),
        _ => None,
    })
}

/// A list of index lists, e.g. polyhedron faces.
pub(crate) fn index_lists(value: &ParameterValue) -> Option<Value<Vec<Vec<usize>>>> {
    rows(value, |row| row.iter().map(|&n| index(n)).collect())
}

/// A 4×4 matrix; a 3×4 matrix gets the `[0, 0, 0, 1]` row appended.
pub(crate) fn matrix(value: &ParameterValue) -> Option<Value<[[f64; 4]; 4]>> {
    let Value::Literal(literal_rows) = rows(value, |row| match *row {
        [a, b, c, d] => Some([a, b, c, d]),
        _ => None,
    })?
    else {
        return symbolic(value);
    };
    match literal_rows[..] {
        [r0, r1, r2] => Some(Value::Literal([r0, r1, r2, [0.0, 0.0, 0.0, 1.0]])),
        [r0, r1, r2, r3] => Some(Value::Literal([r0, r1, r2, r3])),
        _ => None,
    }
}

/// Folds a nested numeric array row by row.
///
/// Arrays that cannot be folded (they reference variables) stay symbolic;
/// arrays whose rows do not fit `row` are rejected.
fn rows<T>(
    value: &ParameterValue,
    row: impl Fn(&[f64]) -> Option<T>,
) -> Option<Value<Vec<T>>> {
    let ParameterValue::Expression(expression) = value else {
        return symbolic(value);
    };
    match expression.as_number_rows() {
        Some(numbers) => numbers
            .iter()
            .map(|r| row(r.as_slice()))
            .collect::<Option<Vec<T>>>()
            .map(Value::Literal),
        None => Some(Value::Expression(expression.clone())),
    }
}

fn index(n: f64) -> Option<usize> {
    (n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
}

/// Applies `$fn`, `$fa` and `$fs`. Returns whether `slot` was one of them.
pub(crate) fn resolution(resolution: &mut Resolution, slot: &str, value: &ParameterValue) -> bool {
    let target = match slot {
        "$fn" => &mut resolution.fn_,
        "$fa" => &mut resolution.fa,
        "$fs" => &mut resolution.fs,
        _ => return false,
    };
    match value.as_number() {
        Some(n) => *target = n,
        None => tracing::debug!(
            variable = slot,
            found = value.describe(),
            "keeping default resolution"
        ),
    }
    true
}
