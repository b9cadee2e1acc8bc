//! Expression AST.
//!
//! Expressions are kept symbolic; nothing here evaluates them beyond the
//! literal folding helpers used by node builders.

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Undef,
}

/// A function-call argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Name for `name = value` arguments
    pub name: Option<String>,
    pub value: Expression,
}

impl Argument {
    /// Creates a positional argument.
    pub fn positional(value: Expression) -> Self {
        Self { name: None, value }
    }

    /// Creates a named argument.
    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// An expression node.
///
/// Composite variants own complete children; a subtree that cannot be
/// lowered becomes [`Expression::Unresolved`] carrying its source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    FunctionCall {
        name: String,
        arguments: Vec<Argument>,
    },
    Array(Vec<Expression>),
    /// `[start : end]` or `[start : step : end]`
    Range {
        start: Box<Expression>,
        step: Option<Box<Expression>>,
        end: Box<Expression>,
    },
    /// `value[index]`
    Index {
        value: Box<Expression>,
        index: Box<Expression>,
    },
    /// `object.member`
    Member {
        object: Box<Expression>,
        member: String,
    },
    /// `let (a = 1) body`, assignments in source order
    Let {
        assignments: Vec<(String, Expression)>,
        body: Box<Expression>,
    },
    /// Source text the lowering gave up on
    Unresolved(String),
}

impl Expression {
    /// A numeric literal.
    pub fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    /// A variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Folds numeric literals, including negated ones.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::{Expression, UnaryOp};
    ///
    /// let minus_two = Expression::Unary {
    ///     op: UnaryOp::Negate,
    ///     operand: Box::new(Expression::number(2.0)),
    /// };
    /// assert_eq!(minus_two.as_number(), Some(-2.0));
    /// assert_eq!(Expression::variable("x").as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Literal(Literal::Number(n)) => Some(*n),
            Self::Unary { op, operand } => match op {
                UnaryOp::Negate => operand.as_number().map(|n| -n),
                UnaryOp::Plus => operand.as_number(),
                UnaryOp::Not => None,
            },
            _ => None,
        }
    }

    /// Folds an array whose items are all numeric literals.
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        match self {
            Self::Array(items) => items.iter().map(Expression::as_number).collect(),
            _ => None,
        }
    }

    /// Folds an array of numeric arrays, e.g. a point list.
    pub fn as_number_rows(&self) -> Option<Vec<Vec<f64>>> {
        match self {
            Self::Array(rows) => rows.iter().map(Expression::as_numbers).collect(),
            _ => None,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Parses an operator token.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Modulo,
            "^" => Self::Power,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return None,
        })
    }

    /// The operator token.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
}

impl UnaryOp {
    /// Parses an operator token.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Negate),
            "+" => Some(Self::Plus),
            "!" => Some(Self::Not),
            _ => None,
        }
    }

    /// The operator token.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "!",
        }
    }
}
