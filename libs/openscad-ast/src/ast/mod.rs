//! # OpenSCAD AST
//!
//! The typed tree produced by the generator. Every node carries the
//! [`SourceLocation`] of the CST text it came from.
//!
//! ## Node Families
//!
//! - **Primitives**: `Cube`, `Sphere`, `Cylinder`, `Polyhedron`, `Circle`,
//!   `Square`, `Polygon`, `Text`
//! - **Transforms**: `Translate`, `Rotate`, `Scale`, `Mirror`, `Multmatrix`,
//!   `Color`, `Offset`, `Resize`, `LinearExtrude`, `RotateExtrude`
//! - **CSG**: `Union`, `Difference`, `Intersection`, `Hull`, `Minkowski`
//! - **Control**: `If`, `ForLoop`, `Let`, `Each`
//! - **Modules/Functions**: `ModuleDefinition`, `FunctionDefinition`,
//!   `ModuleInstantiation`, `Children`
//! - **Statements**: `Assignment`, `Echo`, `Assert`, `Include`, `Use`,
//!   `Modified`

use std::collections::BTreeMap;

use glam::{DVec2, DVec3};

use crate::location::SourceLocation;

mod expression;
mod values;

pub use expression::{Argument, BinaryOp, Expression, Literal, UnaryOp};
pub use values::{
    ColorValue, CubeSize, ForVariable, Iterable, Modifier, ModuleParameter, NumericRange,
    Parameter, ParameterValue, Resolution, Rotation, SquareSize, Value,
};

/// A node of the OpenSCAD AST.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // ============ Primitives ============
    Cube {
        size: CubeSize,
        center: bool,
        location: SourceLocation,
    },
    /// Exactly one of `r` and `d` is set.
    Sphere {
        r: Option<Value<f64>>,
        d: Option<Value<f64>>,
        resolution: Resolution,
        location: SourceLocation,
    },
    /// `r`/`d`, `r1`/`d1` and `r2`/`d2` are pairwise exclusive.
    Cylinder {
        h: Value<f64>,
        r: Option<Value<f64>>,
        r1: Option<Value<f64>>,
        r2: Option<Value<f64>>,
        d: Option<Value<f64>>,
        d1: Option<Value<f64>>,
        d2: Option<Value<f64>>,
        center: bool,
        resolution: Resolution,
        location: SourceLocation,
    },
    Polyhedron {
        points: Value<Vec<DVec3>>,
        faces: Value<Vec<Vec<usize>>>,
        convexity: u32,
        location: SourceLocation,
    },
    /// Exactly one of `r` and `d` is set.
    Circle {
        r: Option<Value<f64>>,
        d: Option<Value<f64>>,
        resolution: Resolution,
        location: SourceLocation,
    },
    Square {
        size: SquareSize,
        center: bool,
        location: SourceLocation,
    },
    Polygon {
        points: Value<Vec<DVec2>>,
        paths: Option<Value<Vec<Vec<usize>>>>,
        convexity: u32,
        location: SourceLocation,
    },
    Text {
        text: Value<String>,
        size: Value<f64>,
        font: Option<String>,
        halign: String,
        valign: String,
        spacing: f64,
        direction: String,
        language: String,
        script: String,
        resolution: Resolution,
        location: SourceLocation,
    },

    // ============ Transforms ============
    Translate {
        v: Value<DVec3>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Rotate {
        a: Rotation,
        /// Axis for a scalar angle; `None` rotates about Z.
        v: Option<Value<DVec3>>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Scale {
        v: Value<DVec3>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Mirror {
        v: Value<DVec3>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    /// Row-major 4×4 matrix.
    Multmatrix {
        matrix: Value<[[f64; 4]; 4]>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Color {
        color: ColorValue,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    /// Exactly one of `r` and `delta` is set.
    Offset {
        r: Option<Value<f64>>,
        delta: Option<Value<f64>>,
        chamfer: bool,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Resize {
        newsize: Value<DVec3>,
        auto: [bool; 3],
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    LinearExtrude {
        height: Value<f64>,
        center: bool,
        convexity: u32,
        twist: Value<f64>,
        slices: u32,
        scale: Value<DVec2>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    RotateExtrude {
        angle: Value<f64>,
        convexity: u32,
        resolution: Resolution,
        children: Vec<AstNode>,
        location: SourceLocation,
    },

    // ============ CSG ============
    Union {
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Difference {
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Intersection {
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Hull {
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Minkowski {
        children: Vec<AstNode>,
        location: SourceLocation,
    },

    // ============ Control ============
    If {
        condition: Expression,
        then_branch: Vec<AstNode>,
        else_branch: Option<Vec<AstNode>>,
        location: SourceLocation,
    },
    ForLoop {
        variables: Vec<ForVariable>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    Let {
        assignments: BTreeMap<String, ParameterValue>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    Each {
        expression: Expression,
        location: SourceLocation,
    },

    // ============ Modules and Functions ============
    ModuleDefinition {
        name: String,
        parameters: Vec<ModuleParameter>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    FunctionDefinition {
        name: String,
        parameters: Vec<ModuleParameter>,
        expression: Expression,
        location: SourceLocation,
    },
    /// A call to a module the generator has no builder for.
    ModuleInstantiation {
        name: String,
        arguments: Vec<Parameter>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Children {
        index: Option<ParameterValue>,
        location: SourceLocation,
    },

    // ============ Statements ============
    Assignment {
        name: String,
        value: ParameterValue,
        location: SourceLocation,
    },
    Echo {
        arguments: Vec<Parameter>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Assert {
        arguments: Vec<Parameter>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
    Include {
        path: String,
        location: SourceLocation,
    },
    Use {
        path: String,
        location: SourceLocation,
    },
    Modified {
        modifier: Modifier,
        child: Box<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    /// The source range this node was built from.
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::Cube { location, .. }
            | Self::Sphere { location, .. }
            | Self::Cylinder { location, .. }
            | Self::Polyhedron { location, .. }
            | Self::Circle { location, .. }
            | Self::Square { location, .. }
            | Self::Polygon { location, .. }
            | Self::Text { location, .. }
            | Self::Translate { location, .. }
            | Self::Rotate { location, .. }
            | Self::Scale { location, .. }
            | Self::Mirror { location, .. }
            | Self::Multmatrix { location, .. }
            | Self::Color { location, .. }
            | Self::Offset { location, .. }
            | Self::Resize { location, .. }
            | Self::LinearExtrude { location, .. }
            | Self::RotateExtrude { location, .. }
            | Self::Union { location, .. }
            | Self::Difference { location, .. }
            | Self::Intersection { location, .. }
            | Self::Hull { location, .. }
            | Self::Minkowski { location, .. }
            | Self::If { location, .. }
            | Self::ForLoop { location, .. }
            | Self::Let { location, .. }
            | Self::Each { location, .. }
            | Self::ModuleDefinition { location, .. }
            | Self::FunctionDefinition { location, .. }
            | Self::ModuleInstantiation { location, .. }
            | Self::Children { location, .. }
            | Self::Assignment { location, .. }
            | Self::Echo { location, .. }
            | Self::Assert { location, .. }
            | Self::Include { location, .. }
            | Self::Use { location, .. }
            | Self::Modified { location, .. } => *location,
        }
    }

    /// Short lowercase name of the node kind, as written in OpenSCAD.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::{AstNode, SourceLocation};
    ///
    /// let node = AstNode::Union { children: vec![], location: SourceLocation::zero() };
    /// assert_eq!(node.name(), "union");
    /// ```
    pub fn name(&self) -> &str {
        match self {
            Self::Cube { .. } => "cube",
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::Polyhedron { .. } => "polyhedron",
            Self::Circle { .. } => "circle",
            Self::Square { .. } => "square",
            Self::Polygon { .. } => "polygon",
            Self::Text { .. } => "text",
            Self::Translate { .. } => "translate",
            Self::Rotate { .. } => "rotate",
            Self::Scale { .. } => "scale",
            Self::Mirror { .. } => "mirror",
            Self::Multmatrix { .. } => "multmatrix",
            Self::Color { .. } => "color",
            Self::Offset { .. } => "offset",
            Self::Resize { .. } => "resize",
            Self::LinearExtrude { .. } => "linear_extrude",
            Self::RotateExtrude { .. } => "rotate_extrude",
            Self::Union { .. } => "union",
            Self::Difference { .. } => "difference",
            Self::Intersection { .. } => "intersection",
            Self::Hull { .. } => "hull",
            Self::Minkowski { .. } => "minkowski",
            Self::If { .. } => "if",
            Self::ForLoop { .. } => "for",
            Self::Let { .. } => "let",
            Self::Each { .. } => "each",
            Self::ModuleDefinition { .. } => "module",
            Self::FunctionDefinition { .. } => "function",
            Self::ModuleInstantiation { name, .. } => name.as_str(),
            Self::Children { .. } => "children",
            Self::Assignment { .. } => "assignment",
            Self::Echo { .. } => "echo",
            Self::Assert { .. } => "assert",
            Self::Include { .. } => "include",
            Self::Use { .. } => "use",
            Self::Modified { .. } => "modifier",
        }
    }

    /// Direct child statements of transforms, CSG operations and calls.
    ///
    /// Control structures keep their bodies in dedicated fields and return
    /// an empty slice here.
    pub fn children(&self) -> &[AstNode] {
        match self {
            Self::Translate { children, .. }
            | Self::Rotate { children, .. }
            | Self::Scale { children, .. }
            | Self::Mirror { children, .. }
            | Self::Multmatrix { children, .. }
            | Self::Color { children, .. }
            | Self::Offset { children, .. }
            | Self::Resize { children, .. }
            | Self::LinearExtrude { children, .. }
            | Self::RotateExtrude { children, .. }
            | Self::Union { children, .. }
            | Self::Difference { children, .. }
            | Self::Intersection { children, .. }
            | Self::Hull { children, .. }
            | Self::Minkowski { children, .. }
            | Self::ModuleInstantiation { children, .. }
            | Self::Echo { children, .. }
            | Self::Assert { children, .. } => children,
            Self::Modified { child, .. } => std::slice::from_ref(child.as_ref()),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_reported_for_every_family() {
        let location = SourceLocation::zero();
        let nodes = [
            AstNode::Cube {
                size: CubeSize::Scalar(1.0),
                center: false,
                location,
            },
            AstNode::Union {
                children: vec![],
                location,
            },
            AstNode::Each {
                expression: Expression::variable("xs"),
                location,
            },
        ];
        for node in &nodes {
            assert_eq!(node.location(), location);
        }
    }

    #[test]
    fn test_children_of_modified_node() {
        let location = SourceLocation::zero();
        let node = AstNode::Modified {
            modifier: Modifier::Highlight,
            child: Box::new(AstNode::Hull {
                children: vec![],
                location,
            }),
            location,
        };
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].name(), "hull");
    }

    #[test]
    fn test_instantiation_name_is_callee() {
        let node = AstNode::ModuleInstantiation {
            name: "gear".to_string(),
            arguments: vec![],
            children: vec![],
            location: SourceLocation::zero(),
        };
        assert_eq!(node.name(), "gear");
        assert!(node.children().is_empty());
    }
}
