//! Parameter values and the typed field values of AST nodes.

use glam::{DVec2, DVec3, DVec4};

use super::expression::Expression;
use config::constants::{DEFAULT_FA, DEFAULT_FN, DEFAULT_FS};

/// One argument of a call, in source order.
///
/// # Example
///
/// ```rust
/// use openscad_ast::{Parameter, ParameterValue};
///
/// let size = Parameter::named("size", ParameterValue::Number(10.0));
/// assert!(size.is_named());
/// assert!(!Parameter::positional(ParameterValue::Boolean(true)).is_named());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// `None` for positional arguments
    pub name: Option<String>,
    pub value: ParameterValue,
}

impl Parameter {
    /// Creates a positional parameter.
    pub fn positional(value: ParameterValue) -> Self {
        Self { name: None, value }
    }

    /// Creates a named parameter.
    pub fn named(name: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    /// Whether the argument was written as `name = value`.
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// The value of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Number(f64),
    Boolean(bool),
    String(String),
    Vector2(DVec2),
    Vector3(DVec3),
    Expression(Expression),
    /// The `undef` literal
    Undefined,
    /// Raw source text that neither extraction nor lowering could type
    Unresolved(String),
}

impl ParameterValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Describes the value's shape for error messages.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use openscad_ast::ParameterValue;
    ///
    /// assert_eq!(ParameterValue::Vector2(DVec2::ONE).describe(), "a 2-component vector");
    /// ```
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Number(_) => "a number",
            Self::Boolean(_) => "a boolean",
            Self::String(_) => "a string",
            Self::Vector2(_) => "a 2-component vector",
            Self::Vector3(_) => "a 3-component vector",
            Self::Expression(_) => "an expression",
            Self::Undefined => "undef",
            Self::Unresolved(_) => "an unresolved value",
        }
    }
}

/// A node field that is either known at generation time or left symbolic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    Literal(T),
    Expression(Expression),
}

impl<T> Value<T> {
    /// The literal, if the field was folded.
    pub fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Expression(_) => None,
        }
    }
}

/// Resolution special variables accepted by curved shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// `$fn`
    pub fn_: f64,
    /// `$fa`
    pub fa: f64,
    /// `$fs`
    pub fs: f64,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            fn_: DEFAULT_FN,
            fa: DEFAULT_FA,
            fs: DEFAULT_FS,
        }
    }
}

/// `cube` size.
#[derive(Debug, Clone, PartialEq)]
pub enum CubeSize {
    Scalar(f64),
    Vector(DVec3),
    Expression(Expression),
}

/// `square` size.
#[derive(Debug, Clone, PartialEq)]
pub enum SquareSize {
    Scalar(f64),
    Vector(DVec2),
    Expression(Expression),
}

/// `rotate` angle argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Rotation {
    /// Single angle, about `v` or the Z axis
    Angle(f64),
    /// Per-axis angles in degrees
    Euler(DVec3),
    Expression(Expression),
}

/// `color` argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// Components in `[0, 1]`; three-component input gets alpha appended
    Rgba(DVec4),
    /// CSS-style name or hex string
    Named { name: String, alpha: f64 },
    Expression {
        expression: Expression,
        alpha: Option<f64>,
    },
}

/// Numeric range with optional step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub start: f64,
    pub step: Option<f64>,
    pub end: f64,
}

impl NumericRange {
    /// `[start, end]` or `[start, step, end]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::NumericRange;
    ///
    /// let range = NumericRange { start: 0.0, step: Some(2.0), end: 10.0 };
    /// assert_eq!(range.to_vec(), vec![0.0, 2.0, 10.0]);
    /// ```
    pub fn to_vec(&self) -> Vec<f64> {
        match self.step {
            Some(step) => vec![self.start, step, self.end],
            None => vec![self.start, self.end],
        }
    }
}

/// What a `for` variable iterates over.
#[derive(Debug, Clone, PartialEq)]
pub enum Iterable {
    Range(NumericRange),
    Expression(Expression),
}

/// One `variable = iterable` binding of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForVariable {
    pub variable: String,
    pub iterable: Iterable,
    /// Explicit range step; absent means unit step
    pub step: Option<f64>,
}

/// A module or function parameter declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleParameter {
    pub name: String,
    pub default_value: Option<ParameterValue>,
}

/// Statement modifier characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `*`
    Disable,
    /// `!`
    ShowOnly,
    /// `#`
    Highlight,
    /// `%`
    Background,
}

impl Modifier {
    /// Parses a modifier character.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "*" => Some(Self::Disable),
            "!" => Some(Self::ShowOnly),
            "#" => Some(Self::Highlight),
            "%" => Some(Self::Background),
            _ => None,
        }
    }
}
