//! # Primitive Builder
//!
//! `cube`, `sphere`, `cylinder`, `polyhedron`, `circle`, `square`,
//! `polygon` and `text`. Primitives are leaves: they never consume a body.
//!
//! ## Positional Slots
//!
//! | Call       | Slots                                                       |
//! |------------|-------------------------------------------------------------|
//! | cube       | size, center                                                |
//! | sphere     | r                                                           |
//! | cylinder   | h, r1, r2, center                                           |
//! | polyhedron | points, faces, convexity                                    |
//! | circle     | r                                                           |
//! | square     | size, center                                                |
//! | polygon    | points, paths, convexity                                    |
//! | text       | text, size, font, halign, valign, spacing, direction,       |
//! |            | language, script                                            |

use config::constants::{
    DEFAULT_CONVEXITY, DEFAULT_CUBE_SIZE, DEFAULT_CYLINDER_HEIGHT, DEFAULT_RADIUS,
    DEFAULT_SQUARE_SIZE, DEFAULT_TEXT_DIRECTION, DEFAULT_TEXT_HALIGN, DEFAULT_TEXT_LANGUAGE,
    DEFAULT_TEXT_SCRIPT, DEFAULT_TEXT_SIZE, DEFAULT_TEXT_SPACING, DEFAULT_TEXT_VALIGN,
};

use super::shared::{boolean, count, index_lists, numeric, points2, points3, resolution, string};
use crate::ast::{AstNode, CubeSize, ParameterValue, Resolution, SquareSize, Value};
use crate::error::GenerateError;
use crate::generator::dispatch::{Call, ChildSource, NodeBuilder};

const PRIMITIVES: &[&str] = &[
    "cube",
    "sphere",
    "cylinder",
    "polyhedron",
    "circle",
    "square",
    "polygon",
    "text",
];

/// Builds 2D and 3D primitive shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveBuilder;

impl NodeBuilder for PrimitiveBuilder {
    fn family(&self) -> &'static str {
        "primitive"
    }

    fn claims(&self, name: &str) -> bool {
        PRIMITIVES.contains(&name)
    }

    fn build(
        &self,
        call: Call<'_>,
        _body: &mut dyn ChildSource,
    ) -> Result<Option<AstNode>, GenerateError> {
        Ok(match call.name {
            "cube" => Some(cube(&call)),
            "sphere" => Some(sphere(&call)),
            "cylinder" => Some(cylinder(&call)),
            "polyhedron" => Some(polyhedron(&call)),
            "circle" => Some(circle(&call)),
            "square" => Some(square(&call)),
            "polygon" => Some(polygon(&call)),
            "text" => Some(text(&call)),
            _ => None,
        })
    }
}

// ============ 3D ============

fn cube(call: &Call<'_>) -> AstNode {
    let mut size = CubeSize::Scalar(DEFAULT_CUBE_SIZE);
    let mut center = false;

    for (slot, value) in call.slots(&["size", "center"]) {
        match (slot, value) {
            ("size", ParameterValue::Number(n)) => size = CubeSize::Scalar(*n),
            ("size", ParameterValue::Vector3(v)) => size = CubeSize::Vector(*v),
            ("size", other) => match numeric(other) {
                Some(Value::Expression(expression)) => size = CubeSize::Expression(expression),
                _ => call.ignore(slot, other),
            },
            ("center", other) => match boolean(other) {
                Some(b) => center = b,
                None => call.ignore(slot, other),
            },
            (_, other) => call.ignore(slot, other),
        }
    }

    AstNode::Cube {
        size,
        center,
        location: call.location,
    }
}

/// Radius/diameter pair where setting one clears the other.
#[derive(Default)]
struct RadiusPair {
    r: Option<Value<f64>>,
    d: Option<Value<f64>>,
}

impl RadiusPair {
    fn set_radius(&mut self, value: Value<f64>) {
        self.r = Some(value);
        self.d = None;
    }

    fn set_diameter(&mut self, value: Value<f64>) {
        self.d = Some(value);
        self.r = None;
    }

    fn is_empty(&self) -> bool {
        self.r.is_none() && self.d.is_none()
    }

    /// Applies `r`/`d` style slots. Returns whether `slot` was one of them.
    fn apply(&mut self, radius: &str, diameter: &str, slot: &str, value: &ParameterValue) -> bool {
        if slot != radius && slot != diameter {
            return false;
        }
        match numeric(value) {
            Some(v) if slot == radius => self.set_radius(v),
            Some(v) => self.set_diameter(v),
            None => tracing::debug!(argument = slot, found = value.describe(), "ignoring argument"),
        }
        true
    }
}

/// Shared by `sphere` and `circle`: `r` or `d`, plus resolution.
fn round(call: &Call<'_>) -> (RadiusPair, Resolution) {
    let mut pair = RadiusPair::default();
    let mut res = Resolution::default();

    for (slot, value) in call.slots(&["r"]) {
        if !pair.apply("r", "d", slot, value) && !resolution(&mut res, slot, value) {
            call.ignore(slot, value);
        }
    }

    if pair.is_empty() {
        pair.set_radius(Value::Literal(DEFAULT_RADIUS));
    }
    (pair, res)
}

fn sphere(call: &Call<'_>) -> AstNode {
    let (RadiusPair { r, d }, resolution) = round(call);
    AstNode::Sphere {
        r,
        d,
        resolution,
        location: call.location,
    }
}

fn cylinder(call: &Call<'_>) -> AstNode {
    let mut h = Value::Literal(DEFAULT_CYLINDER_HEIGHT);
    let mut both = RadiusPair::default();
    let mut bottom = RadiusPair::default();
    let mut top = RadiusPair::default();
    let mut center = false;
    let mut res = Resolution::default();

    for (slot, value) in call.slots(&["h", "r1", "r2", "center"]) {
        let handled = both.apply("r", "d", slot, value)
            || bottom.apply("r1", "d1", slot, value)
            || top.apply("r2", "d2", slot, value)
            || resolution(&mut res, slot, value);
        if handled {
            continue;
        }
        match slot {
            "h" => match numeric(value) {
                Some(v) => h = v,
                None => call.ignore(slot, value),
            },
            "center" => match boolean(value) {
                Some(b) => center = b,
                None => call.ignore(slot, value),
            },
            _ => call.ignore(slot, value),
        }
    }

    if both.is_empty() && bottom.is_empty() && top.is_empty() {
        both.set_radius(Value::Literal(DEFAULT_RADIUS));
    }

    AstNode::Cylinder {
        h,
        r: both.r,
        r1: bottom.r,
        r2: top.r,
        d: both.d,
        d1: bottom.d,
        d2: top.d,
        center,
        resolution: res,
        location: call.location,
    }
}

fn polyhedron(call: &Call<'_>) -> AstNode {
    let mut points = Value::Literal(Vec::new());
    let mut faces = Value::Literal(Vec::new());
    let mut convexity = DEFAULT_CONVEXITY;

    for (slot, value) in call.slots(&["points", "faces", "convexity"]) {
        let applied = match slot {
            "points" => points3(value).map(|v| points = v).is_some(),
            // `triangles` is the pre-2014 name of `faces`
            "faces" | "triangles" => index_lists(value).map(|v| faces = v).is_some(),
            "convexity" => count(value).map(|c| convexity = c).is_some(),
            _ => false,
        };
        if !applied {
            call.ignore(slot, value);
        }
    }

    AstNode::Polyhedron {
        points,
        faces,
        convexity,
        location: call.location,
    }
}

// ============ 2D ============

fn circle(call: &Call<'_>) -> AstNode {
    let (RadiusPair { r, d }, resolution) = round(call);
    AstNode::Circle {
        r,
        d,
        resolution,
        location: call.location,
    }
}

fn square(call: &Call<'_>) -> AstNode {
    let mut size = SquareSize::Scalar(DEFAULT_SQUARE_SIZE);
    let mut center = false;

    for (slot, value) in call.slots(&["size", "center"]) {
        match (slot, value) {
            ("size", ParameterValue::Number(n)) => size = SquareSize::Scalar(*n),
            ("size", ParameterValue::Vector2(v)) => size = SquareSize::Vector(*v),
            ("size", other) => match numeric(other) {
                Some(Value::Expression(expression)) => size = SquareSize::Expression(expression),
                _ => call.ignore(slot, other),
            },
            ("center", other) => match boolean(other) {
                Some(b) => center = b,
                None => call.ignore(slot, other),
            },
            (_, other) => call.ignore(slot, other),
        }
    }

    AstNode::Square {
        size,
        center,
        location: call.location,
    }
}

fn polygon(call: &Call<'_>) -> AstNode {
    let mut points = Value::Literal(Vec::new());
    let mut paths = None;
    let mut convexity = DEFAULT_CONVEXITY;

    for (slot, value) in call.slots(&["points", "paths", "convexity"]) {
        let applied = match (slot, value) {
            ("points", _) => points2(value).map(|v| points = v).is_some(),
            ("paths", ParameterValue::Undefined) => {
                paths = None;
                true
            }
            ("paths", _) => index_lists(value).map(|v| paths = Some(v)).is_some(),
            ("convexity", _) => count(value).map(|c| convexity = c).is_some(),
            _ => false,
        };
        if !applied {
            call.ignore(slot, value);
        }
    }

    AstNode::Polygon {
        points,
        paths,
        convexity,
        location: call.location,
    }
}

fn text(call: &Call<'_>) -> AstNode {
    let mut text = Value::Literal(String::new());
    let mut size = Value::Literal(DEFAULT_TEXT_SIZE);
    let mut font = None;
    let mut halign = DEFAULT_TEXT_HALIGN.to_string();
    let mut valign = DEFAULT_TEXT_VALIGN.to_string();
    let mut spacing = DEFAULT_TEXT_SPACING;
    let mut direction = DEFAULT_TEXT_DIRECTION.to_string();
    let mut language = DEFAULT_TEXT_LANGUAGE.to_string();
    let mut script = DEFAULT_TEXT_SCRIPT.to_string();
    let mut res = Resolution::default();

    let slots = [
        "text",
        "size",
        "font",
        "halign",
        "valign",
        "spacing",
        "direction",
        "language",
        "script",
    ];
    for (slot, value) in call.slots(&slots) {
        if resolution(&mut res, slot, value) {
            continue;
        }
        let applied = match slot {
            "text" => match value {
                ParameterValue::String(s) => {
                    text = Value::Literal(s.clone());
                    true
                }
                ParameterValue::Number(n) => {
                    text = Value::Literal(n.to_string());
                    true
                }
                other => numeric(other)
                    .and_then(|v| match v {
                        Value::Expression(expression) => Some(expression),
                        Value::Literal(_) => None,
                    })
                    .map(|expression| text = Value::Expression(expression))
                    .is_some(),
            },
            "size" => numeric(value).map(|v| size = v).is_some(),
            "font" => string(value).map(|s| font = Some(s)).is_some(),
            "halign" => string(value).map(|s| halign = s).is_some(),
            "valign" => string(value).map(|s| valign = s).is_some(),
            "spacing" => value.as_number().map(|n| spacing = n).is_some(),
            "direction" => string(value).map(|s| direction = s).is_some(),
            "language" => string(value).map(|s| language = s).is_some(),
            "script" => string(value).map(|s| script = s).is_some(),
            _ => false,
        };
        if !applied {
            call.ignore(slot, value);
        }
    }

    AstNode::Text {
        text,
        size,
        font,
        halign,
        valign,
        spacing,
        direction,
        language,
        script,
        resolution: res,
        location: call.location,
    }
}
