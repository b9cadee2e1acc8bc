//! # Transform Builder
//!
//! Transforms wrap their children: the body that follows the call, or the
//! single statement after an open call such as `translate([1, 0, 0]) cube();`.
//!
//! Short vectors are padded to three components: with `0` for `translate`
//! and `mirror`, with `1` for `scale`.

use config::constants::{
    DEFAULT_ALPHA, DEFAULT_COLOR, DEFAULT_CONVEXITY, DEFAULT_EXTRUDE_HEIGHT,
    DEFAULT_EXTRUDE_SLICES, DEFAULT_MIRROR_NORMAL, DEFAULT_OFFSET_DELTA, DEFAULT_REVOLVE_ANGLE,
};
use glam::{DVec2, DVec3, DVec4};

use super::shared::{
    boolean, count, matrix, numeric, resolution, symbolic, vector2, vector3,
};
use crate::ast::{
    AstNode, ColorValue, Expression, Literal, ParameterValue, Resolution, Rotation, Value,
};
use crate::error::GenerateError;
use crate::generator::dispatch::{Call, ChildSource, NodeBuilder};

const TRANSFORMS: &[&str] = &[
    "translate",
    "rotate",
    "scale",
    "mirror",
    "multmatrix",
    "color",
    "offset",
    "resize",
    "linear_extrude",
    "rotate_extrude",
];

const IDENTITY: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Builds transforms and extrusions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformBuilder;

impl NodeBuilder for TransformBuilder {
    fn family(&self) -> &'static str {
        "transform"
    }

    fn claims(&self, name: &str) -> bool {
        TRANSFORMS.contains(&name)
    }

    fn build(
        &self,
        call: Call<'_>,
        body: &mut dyn ChildSource,
    ) -> Result<Option<AstNode>, GenerateError> {
        let node = match call.name {
            "translate" => AstNode::Translate {
                v: vector(&call, "v", 0.0, DVec3::ZERO),
                children: body.children()?,
                location: call.location,
            },
            "rotate" => rotate(&call, body.children()?),
            "scale" => AstNode::Scale {
                v: vector(&call, "v", 1.0, DVec3::ONE),
                children: body.children()?,
                location: call.location,
            },
            "mirror" => AstNode::Mirror {
                v: vector(&call, "v", 0.0, DVec3::from_array(DEFAULT_MIRROR_NORMAL)),
                children: body.children()?,
                location: call.location,
            },
            "multmatrix" => multmatrix(&call, body.children()?),
            "color" => color(&call, body.children()?),
            "offset" => offset(&call, body.children()?),
            "resize" => resize(&call, body.children()?),
            "linear_extrude" => linear_extrude(&call, body.children()?),
            "rotate_extrude" => rotate_extrude(&call, body.children()?),
            _ => return Ok(None),
        };
        Ok(Some(node))
    }
}

// ============ Affine ============

/// The single vector argument of `translate`, `scale` and `mirror`.
///
/// A scalar splats to all three axes, which is only meaningful for `scale`
/// but harmless elsewhere.
fn vector(call: &Call<'_>, name: &'static str, pad_z: f64, default: DVec3) -> Value<DVec3> {
    let mut v = Value::Literal(default);
    for (slot, value) in call.slots(&[name]) {
        if slot != name {
            call.ignore(slot, value);
            continue;
        }
        match value {
            ParameterValue::Number(n) => v = Value::Literal(DVec3::splat(*n)),
            other => match vector3(other, pad_z) {
                Some(parsed) => v = parsed,
                None => call.ignore(slot, other),
            },
        }
    }
    v
}

fn rotate(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut a = Rotation::Angle(0.0);
    let mut axis = None;

    for (slot, value) in call.slots(&["a", "v"]) {
        match (slot, value) {
            ("a", ParameterValue::Number(n)) => a = Rotation::Angle(*n),
            ("a", ParameterValue::Vector3(v)) => a = Rotation::Euler(*v),
            ("a", ParameterValue::Vector2(v)) => a = Rotation::Euler(v.extend(0.0)),
            ("a", other) => match symbolic::<f64>(other) {
                Some(Value::Expression(expression)) => a = Rotation::Expression(expression),
                _ => call.ignore(slot, other),
            },
            ("v", other) => match vector3(other, 0.0) {
                Some(parsed) => axis = Some(parsed),
                None => call.ignore(slot, other),
            },
            (_, other) => call.ignore(slot, other),
        }
    }

    AstNode::Rotate {
        a,
        v: axis,
        children,
        location: call.location,
    }
}

fn multmatrix(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut m = Value::Literal(IDENTITY);
    for (slot, value) in call.slots(&["m"]) {
        match (slot, matrix(value)) {
            ("m", Some(parsed)) => m = parsed,
            _ => call.ignore(slot, value),
        }
    }
    AstNode::Multmatrix {
        matrix: m,
        children,
        location: call.location,
    }
}

// ============ Appearance ============

fn color(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut c = None;
    let mut alpha = None;

    for (slot, value) in call.slots(&["c", "alpha"]) {
        match slot {
            "c" => c = Some(value),
            "alpha" => match value.as_number() {
                Some(n) => alpha = Some(n),
                None => call.ignore(slot, value),
            },
            _ => call.ignore(slot, value),
        }
    }

    let color = match c {
        None => ColorValue::Rgba(DVec4::from_array(DEFAULT_COLOR)),
        Some(value) => color_value(value, alpha).unwrap_or_else(|| {
            call.ignore("c", value);
            ColorValue::Rgba(DVec4::from_array(DEFAULT_COLOR))
        }),
    };

    AstNode::Color {
        color,
        children,
        location: call.location,
    }
}

/// A four-component color keeps its own alpha; `alpha` applies otherwise.
fn color_value(value: &ParameterValue, alpha: Option<f64>) -> Option<ColorValue> {
    let opacity = alpha.unwrap_or(DEFAULT_ALPHA);
    match value {
        ParameterValue::Vector3(rgb) => Some(ColorValue::Rgba(rgb.extend(opacity))),
        ParameterValue::String(name) => Some(ColorValue::Named {
            name: name.clone(),
            alpha: opacity,
        }),
        ParameterValue::Expression(expression) => match expression.as_numbers().as_deref() {
            Some(&[r, g, b, a]) => Some(ColorValue::Rgba(DVec4::new(r, g, b, a))),
            Some(&[r, g, b]) => Some(ColorValue::Rgba(DVec4::new(r, g, b, opacity))),
            Some(_) => None,
            None => Some(ColorValue::Expression {
                expression: expression.clone(),
                alpha,
            }),
        },
        ParameterValue::Unresolved(text) => Some(ColorValue::Expression {
            expression: Expression::Unresolved(text.clone()),
            alpha,
        }),
        _ => None,
    }
}

// ============ 2D Outlines ============

fn offset(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut r = None;
    let mut delta = None;
    let mut chamfer = false;

    for (slot, value) in call.slots(&["r", "delta", "chamfer"]) {
        match slot {
            "r" => match numeric(value) {
                Some(v) => {
                    r = Some(v);
                    delta = None;
                }
                None => call.ignore(slot, value),
            },
            "delta" => match numeric(value) {
                Some(v) => {
                    delta = Some(v);
                    r = None;
                }
                None => call.ignore(slot, value),
            },
            "chamfer" => match boolean(value) {
                Some(b) => chamfer = b,
                None => call.ignore(slot, value),
            },
            _ => call.ignore(slot, value),
        }
    }

    if r.is_none() && delta.is_none() {
        delta = Some(Value::Literal(DEFAULT_OFFSET_DELTA));
    }

    AstNode::Offset {
        r,
        delta,
        chamfer,
        children,
        location: call.location,
    }
}

fn resize(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut newsize = Value::Literal(DVec3::ZERO);
    let mut auto = [false; 3];

    for (slot, value) in call.slots(&["newsize", "auto"]) {
        let applied = match slot {
            "newsize" => vector3(value, 0.0).map(|v| newsize = v).is_some(),
            "auto" => auto_flags(value).map(|flags| auto = flags).is_some(),
            _ => false,
        };
        if !applied {
            call.ignore(slot, value);
        }
    }

    AstNode::Resize {
        newsize,
        auto,
        children,
        location: call.location,
    }
}

/// `auto = true` or `auto = [true, false, true]`; missing axes are `false`.
fn auto_flags(value: &ParameterValue) -> Option<[bool; 3]> {
    match value {
        ParameterValue::Boolean(b) => Some([*b; 3]),
        ParameterValue::Expression(Expression::Array(items)) if items.len() <= 3 => {
            let mut flags = [false; 3];
            for (flag, item) in flags.iter_mut().zip(items) {
                *flag = match item {
                    Expression::Literal(Literal::Boolean(b)) => *b,
                    Expression::Variable(name) if name == "true" => true,
                    Expression::Variable(name) if name == "false" => false,
                    _ => return None,
                };
            }
            Some(flags)
        }
        _ => None,
    }
}

// ============ Extrusion ============

fn linear_extrude(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut height = Value::Literal(DEFAULT_EXTRUDE_HEIGHT);
    let mut center = false;
    let mut convexity = DEFAULT_CONVEXITY;
    let mut twist = Value::Literal(0.0);
    let mut slices = DEFAULT_EXTRUDE_SLICES;
    let mut scale = Value::Literal(DVec2::ONE);

    let slots = ["height", "center", "convexity", "twist", "slices", "scale"];
    for (slot, value) in call.slots(&slots) {
        let applied = match slot {
            "height" => numeric(value).map(|v| height = v).is_some(),
            "center" => boolean(value).map(|b| center = b).is_some(),
            "convexity" => count(value).map(|c| convexity = c).is_some(),
            "twist" => numeric(value).map(|v| twist = v).is_some(),
            "slices" => count(value).map(|c| slices = c).is_some(),
            "scale" => match value {
                ParameterValue::Number(n) => {
                    scale = Value::Literal(DVec2::splat(*n));
                    true
                }
                other => vector2(other).map(|v| scale = v).is_some(),
            },
            // resolution only refines the twist; nothing to record
            "$fn" | "$fa" | "$fs" => true,
            _ => false,
        };
        if !applied {
            call.ignore(slot, value);
        }
    }

    AstNode::LinearExtrude {
        height,
        center,
        convexity,
        twist,
        slices,
        scale,
        children,
        location: call.location,
    }
}

fn rotate_extrude(call: &Call<'_>, children: Vec<AstNode>) -> AstNode {
    let mut angle = Value::Literal(DEFAULT_REVOLVE_ANGLE);
    let mut convexity = DEFAULT_CONVEXITY;
    let mut res = Resolution::default();

    for (slot, value) in call.slots(&["angle", "convexity"]) {
        if resolution(&mut res, slot, value) {
            continue;
        }
        let applied = match slot {
            "angle" => numeric(value).map(|v| angle = v).is_some(),
            "convexity" => count(value).map(|c| convexity = c).is_some(),
            _ => false,
        };
        if !applied {
            call.ignore(slot, value);
        }
    }

    AstNode::RotateExtrude {
        angle,
        convexity,
        resolution: res,
        children,
        location: call.location,
    }
}
