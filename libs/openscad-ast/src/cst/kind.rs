//! Closed set of CST node kinds understood by the generator.

/// Node kinds of the OpenSCAD tree-sitter grammar.
///
/// Unknown kinds map to [`CstKind::Other`] and are never dispatched on, so a
/// grammar that grows a new rule degrades to "no node" instead of a panic.
///
/// # Example
///
/// ```rust
/// use openscad_ast::cst::CstKind;
///
/// assert_eq!(CstKind::from_kind("module_instantiation"), CstKind::ModuleInstantiation);
/// assert_eq!(CstKind::from_kind("additive_expression"), CstKind::BinaryExpression);
/// assert_eq!(CstKind::from_kind("something_new"), CstKind::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CstKind {
    // Structure
    SourceFile,
    Statement,
    Block,
    Comment,
    Error,

    // Statements
    ModuleInstantiation,
    Arguments,
    Argument,
    AssignmentStatement,
    ModuleDefinition,
    FunctionDefinition,
    ParameterList,
    Parameter,
    IfStatement,
    ForStatement,
    ForBinding,
    LetStatement,
    LetAssignment,
    EachStatement,
    IncludeStatement,
    UseStatement,
    ModifiedStatement,

    // Expressions
    Number,
    String,
    Boolean,
    Undef,
    Identifier,
    SpecialVariable,
    ArrayLiteral,
    RangeExpression,
    BinaryExpression,
    UnaryExpression,
    ConditionalExpression,
    CallExpression,
    IndexExpression,
    MemberExpression,
    LetExpression,
    ParenthesizedExpression,
    Expression,
    PrimaryExpression,

    Other,
}

impl CstKind {
    /// Maps a grammar rule name to its kind.
    ///
    /// A few aliases emitted by other OpenSCAD grammars are accepted.
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "source_file" => Self::SourceFile,
            "statement" => Self::Statement,
            "block" | "union_block" => Self::Block,
            "comment" | "line_comment" | "block_comment" => Self::Comment,
            "ERROR" => Self::Error,

            "module_instantiation" | "module_call" => Self::ModuleInstantiation,
            "arguments" | "argument_list" => Self::Arguments,
            "argument" | "named_argument" => Self::Argument,
            "assignment_statement" | "assignment" | "var_declaration" => {
                Self::AssignmentStatement
            }
            "module_definition" | "module_declaration" => Self::ModuleDefinition,
            "function_definition" | "function_declaration" => Self::FunctionDefinition,
            "parameter_list" | "parameters" => Self::ParameterList,
            "parameter" => Self::Parameter,
            "if_statement" | "if_block" => Self::IfStatement,
            "for_statement" | "for_block" => Self::ForStatement,
            "for_binding" => Self::ForBinding,
            "let_statement" | "let_block" => Self::LetStatement,
            "let_assignment" => Self::LetAssignment,
            "each_statement" | "each" => Self::EachStatement,
            "include_statement" => Self::IncludeStatement,
            "use_statement" => Self::UseStatement,
            "modified_statement" | "modifier_chain" => Self::ModifiedStatement,

            "number" | "integer" | "float" => Self::Number,
            "string" => Self::String,
            "boolean" | "true" | "false" => Self::Boolean,
            "undef" => Self::Undef,
            "identifier" => Self::Identifier,
            "special_variable" => Self::SpecialVariable,
            "array_literal" | "list" | "vector_expression" => Self::ArrayLiteral,
            "range_expression" | "range" => Self::RangeExpression,
            "binary_expression"
            | "logical_or_expression"
            | "logical_and_expression"
            | "equality_expression"
            | "relational_expression"
            | "additive_expression"
            | "multiplicative_expression"
            | "exponent_expression" => Self::BinaryExpression,
            "unary_expression" | "prefix_unary_expression" => Self::UnaryExpression,
            "conditional_expression" | "ternary_expression" => Self::ConditionalExpression,
            "call_expression" | "function_call" => Self::CallExpression,
            "index_expression" => Self::IndexExpression,
            "member_expression" | "dot_index_expression" => Self::MemberExpression,
            "let_expression" => Self::LetExpression,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "expression" => Self::Expression,
            "primary_expression" | "literal" => Self::PrimaryExpression,

            _ => Self::Other,
        }
    }

    /// Kinds that only group a single child expression.
    pub const fn is_expression_wrapper(self) -> bool {
        matches!(
            self,
            Self::Expression | Self::PrimaryExpression | Self::ParenthesizedExpression
        )
    }

    /// Kinds that only group a single child statement.
    pub const fn is_statement_wrapper(self) -> bool {
        matches!(self, Self::Statement)
    }

    /// Kinds that never produce an AST node.
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_grammar_aliases() {
        assert_eq!(CstKind::from_kind("module_call"), CstKind::ModuleInstantiation);
        assert_eq!(CstKind::from_kind("ternary_expression"), CstKind::ConditionalExpression);
        assert_eq!(CstKind::from_kind("list"), CstKind::ArrayLiteral);
        assert_eq!(CstKind::from_kind("integer"), CstKind::Number);
    }

    #[test]
    fn test_precedence_rules_are_binary() {
        for rule in [
            "logical_or_expression",
            "logical_and_expression",
            "equality_expression",
            "relational_expression",
            "additive_expression",
            "multiplicative_expression",
            "exponent_expression",
        ] {
            assert_eq!(CstKind::from_kind(rule), CstKind::BinaryExpression, "{rule}");
        }
    }

    #[test]
    fn test_unknown_rule_is_other() {
        assert_eq!(CstKind::from_kind("lambda"), CstKind::Other);
        assert_eq!(CstKind::from_kind(""), CstKind::Other);
    }

    #[test]
    fn test_classifies_wrappers() {
        assert!(CstKind::ParenthesizedExpression.is_expression_wrapper());
        assert!(!CstKind::ArrayLiteral.is_expression_wrapper());
        assert!(CstKind::Statement.is_statement_wrapper());
        assert!(CstKind::Error.is_trivia());
    }
}
