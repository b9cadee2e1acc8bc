//! # CST Builder
//!
//! Constructs [`SerializedNode`] trees shaped like the OpenSCAD grammar's
//! output. Used by tests and by bridges that synthesize trees without
//! running a parser.
//!
//! Constructors only describe structure. [`finish`] (called by
//! [`source_file`]) lays the tree out as source text, separating siblings
//! with one space, and fills in every node's text, byte offsets and
//! row/column positions.
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::cst::builder::*;
//!
//! // translate([1, 2, 3]) cube(10);
//! let root = source_file(vec![module_call_with_body(
//!     "translate",
//!     vec![arg(array(vec![number("1"), number("2"), number("3")]))],
//!     module_call("cube", vec![arg(number("10"))]),
//! )]);
//! assert!(root.text.starts_with("translate"));
//! ```

use super::{Point, SerializedNode};

// ============ Layout ============

/// Assigns text, offsets and positions to a tree built from constructors.
pub fn finish(mut root: SerializedNode) -> SerializedNode {
    let mut source = String::new();
    assign_offsets(&mut root, &mut source);
    let line_starts = line_starts(&source);
    assign_text_and_points(&mut root, &source, &line_starts);
    root
}

fn assign_offsets(node: &mut SerializedNode, source: &mut String) {
    let start = source.len();
    if node.children.is_empty() {
        source.push_str(&node.text);
    } else {
        for (i, child) in node.children.iter_mut().enumerate() {
            if i > 0 {
                source.push(' ');
            }
            assign_offsets(child, source);
        }
    }
    node.start_index = Some(start);
    node.end_index = Some(source.len());
}

fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn point_at(offset: usize, line_starts: &[usize]) -> Point {
    let row = line_starts
        .partition_point(|&start| start <= offset)
        .saturating_sub(1);
    let column = offset - line_starts.get(row).copied().unwrap_or(0);
    Point::new(row, column)
}

fn assign_text_and_points(node: &mut SerializedNode, source: &str, line_starts: &[usize]) {
    let start = node.start_index.unwrap_or(0);
    let end = node.end_index.unwrap_or(start);
    node.text = source.get(start..end).unwrap_or_default().to_string();
    node.start_position = Some(point_at(start, line_starts));
    node.end_position = Some(point_at(end, line_starts));
    for child in &mut node.children {
        assign_text_and_points(child, source, line_starts);
    }
}

// ============ Generic Constructors ============

/// An anonymous token such as `(`, `;` or `+`.
pub fn token(text: &str) -> SerializedNode {
    let mut node = SerializedNode::new(text, text);
    node.is_named = false;
    node
}

/// A named leaf node.
pub fn leaf(kind: &str, text: &str) -> SerializedNode {
    SerializedNode::new(kind, text)
}

/// A named interior node. Its text is filled in by [`finish`].
pub fn node(kind: &str, children: Vec<SerializedNode>) -> SerializedNode {
    let mut node = SerializedNode::new(kind, "");
    node.children = children;
    node
}

fn separated(items: Vec<SerializedNode>, separator: &str) -> Vec<SerializedNode> {
    let mut out = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(token(separator));
        }
        out.push(item);
    }
    out
}

fn delimited(
    open: &str,
    items: Vec<SerializedNode>,
    separator: &str,
    close: &str,
) -> Vec<SerializedNode> {
    let mut out = vec![token(open)];
    out.extend(separated(items, separator));
    out.push(token(close));
    out
}

// ============ Literals ============

pub fn number(text: &str) -> SerializedNode {
    leaf("number", text)
}

/// A string literal; `content` is wrapped in double quotes.
pub fn string(content: &str) -> SerializedNode {
    leaf("string", &format!("\"{content}\""))
}

pub fn boolean(value: bool) -> SerializedNode {
    leaf("boolean", if value { "true" } else { "false" })
}

pub fn undef() -> SerializedNode {
    leaf("undef", "undef")
}

pub fn ident(name: &str) -> SerializedNode {
    leaf("identifier", name)
}

pub fn special(name: &str) -> SerializedNode {
    leaf("special_variable", name)
}

// ============ Expressions ============

/// `[a, b, ...]`
pub fn array(items: Vec<SerializedNode>) -> SerializedNode {
    node("array_literal", delimited("[", items, ",", "]"))
}

/// `[start : end]` or `[start : step : end]`
pub fn range(
    start: SerializedNode,
    step: Option<SerializedNode>,
    end: SerializedNode,
) -> SerializedNode {
    let mut children = vec![token("["), start.with_field("start"), token(":")];
    if let Some(step) = step {
        children.push(step.with_field("step"));
        children.push(token(":"));
    }
    children.push(end.with_field("end"));
    children.push(token("]"));
    node("range_expression", children)
}

pub fn binary(left: SerializedNode, operator: &str, right: SerializedNode) -> SerializedNode {
    node(
        "binary_expression",
        vec![
            left.with_field("left"),
            token(operator).with_field("operator"),
            right.with_field("right"),
        ],
    )
}

pub fn unary(operator: &str, operand: SerializedNode) -> SerializedNode {
    node(
        "unary_expression",
        vec![
            token(operator).with_field("operator"),
            operand.with_field("operand"),
        ],
    )
}

/// `c ? a : b` with grammar fields on each branch.
pub fn conditional(
    condition: SerializedNode,
    consequence: SerializedNode,
    alternative: SerializedNode,
) -> SerializedNode {
    node(
        "conditional_expression",
        vec![
            condition.with_field("condition"),
            token("?"),
            consequence.with_field("consequence"),
            token(":"),
            alternative.with_field("alternative"),
        ],
    )
}

/// `c ? a : b` as emitted by grammars without fields on the rule.
pub fn conditional_positional(
    condition: SerializedNode,
    consequence: SerializedNode,
    alternative: SerializedNode,
) -> SerializedNode {
    node(
        "conditional_expression",
        vec![condition, token("?"), consequence, token(":"), alternative],
    )
}

pub fn paren(inner: SerializedNode) -> SerializedNode {
    node(
        "parenthesized_expression",
        vec![token("("), inner, token(")")],
    )
}

/// `name(args)` in expression position.
pub fn call(name: &str, args: Vec<SerializedNode>) -> SerializedNode {
    node(
        "call_expression",
        vec![
            ident(name).with_field("function"),
            arguments(args).with_field("arguments"),
        ],
    )
}

/// `value[index]`
pub fn index(value: SerializedNode, index: SerializedNode) -> SerializedNode {
    node(
        "index_expression",
        vec![
            value.with_field("value"),
            token("["),
            index.with_field("index"),
            token("]"),
        ],
    )
}

/// `object.property`
pub fn member(object: SerializedNode, property: &str) -> SerializedNode {
    node(
        "member_expression",
        vec![
            object.with_field("object"),
            token("."),
            ident(property).with_field("property"),
        ],
    )
}

/// `let (a = 1, ...) body` in expression position.
pub fn let_expression(assignments: Vec<SerializedNode>, body: SerializedNode) -> SerializedNode {
    let mut children = vec![token("let")];
    children.extend(delimited("(", assignments, ",", ")"));
    children.push(body.with_field("body"));
    node("let_expression", children)
}

// ============ Arguments ============

/// A positional argument.
pub fn arg(value: SerializedNode) -> SerializedNode {
    node("argument", vec![value.with_field("value")])
}

/// `name = value`
pub fn named_arg(name: &str, value: SerializedNode) -> SerializedNode {
    let name_node = if name.starts_with('$') {
        special(name)
    } else {
        ident(name)
    };
    node(
        "argument",
        vec![
            name_node.with_field("name"),
            token("="),
            value.with_field("value"),
        ],
    )
}

/// `(a, b = c, ...)`
pub fn arguments(args: Vec<SerializedNode>) -> SerializedNode {
    node("arguments", delimited("(", args, ",", ")"))
}

// ============ Statements ============

/// Wraps nodes in a `source_file` root and lays the tree out.
pub fn source_file(statements: Vec<SerializedNode>) -> SerializedNode {
    finish(node("source_file", statements))
}

/// `{ ... }`
pub fn block(statements: Vec<SerializedNode>) -> SerializedNode {
    let mut children = vec![token("{")];
    children.extend(statements);
    children.push(token("}"));
    node("block", children)
}

fn call_head(name: &str, args: Vec<SerializedNode>) -> Vec<SerializedNode> {
    vec![
        ident(name).with_field("name"),
        arguments(args).with_field("arguments"),
    ]
}

/// `name(args);`
pub fn module_call(name: &str, args: Vec<SerializedNode>) -> SerializedNode {
    let mut children = call_head(name, args);
    children.push(token(";"));
    node("module_instantiation", children)
}

/// `name(args) body` where `body` is a block or a single statement.
pub fn module_call_with_body(
    name: &str,
    args: Vec<SerializedNode>,
    body: SerializedNode,
) -> SerializedNode {
    let mut children = call_head(name, args);
    children.push(body.with_field("body"));
    node("module_instantiation", children)
}

/// `name(args)` with neither body nor `;`; the statement that follows it
/// in the enclosing list is its child.
pub fn module_call_open(name: &str, args: Vec<SerializedNode>) -> SerializedNode {
    node("module_instantiation", call_head(name, args))
}

/// `name = value;` where `name` is an identifier or special variable.
pub fn assignment(name: &str, value: SerializedNode) -> SerializedNode {
    let name_node = if name.starts_with('$') {
        special(name)
    } else {
        ident(name)
    };
    node(
        "assignment_statement",
        vec![
            name_node.with_field("name"),
            token("="),
            value.with_field("value"),
            token(";"),
        ],
    )
}

/// `if (condition) consequence [else alternative]`
pub fn if_statement(
    condition: SerializedNode,
    consequence: SerializedNode,
    alternative: Option<SerializedNode>,
) -> SerializedNode {
    let mut children = vec![
        token("if"),
        token("("),
        condition.with_field("condition"),
        token(")"),
        consequence.with_field("consequence"),
    ];
    if let Some(alternative) = alternative {
        children.push(token("else"));
        children.push(alternative.with_field("alternative"));
    }
    node("if_statement", children)
}

/// `variable = range` inside a `for` header.
pub fn for_binding(variable: &str, range: SerializedNode) -> SerializedNode {
    node(
        "for_binding",
        vec![
            ident(variable).with_field("iterator"),
            token("="),
            range.with_field("range"),
        ],
    )
}

/// `for (bindings) body`
pub fn for_statement(bindings: Vec<SerializedNode>, body: SerializedNode) -> SerializedNode {
    let mut children = vec![token("for")];
    children.extend(delimited("(", bindings, ",", ")"));
    children.push(body.with_field("body"));
    node("for_statement", children)
}

/// `name = value` inside a `let` header.
pub fn let_assignment(name: &str, value: SerializedNode) -> SerializedNode {
    node(
        "let_assignment",
        vec![
            ident(name).with_field("name"),
            token("="),
            value.with_field("value"),
        ],
    )
}

/// `let (assignments) body`
pub fn let_statement(assignments: Vec<SerializedNode>, body: SerializedNode) -> SerializedNode {
    let mut children = vec![token("let")];
    children.extend(delimited("(", assignments, ",", ")"));
    children.push(body.with_field("body"));
    node("let_statement", children)
}

/// `each value;`
pub fn each_statement(value: SerializedNode) -> SerializedNode {
    node(
        "each_statement",
        vec![token("each"), value.with_field("value"), token(";")],
    )
}

/// `name [= default]` in a parameter list.
pub fn parameter(name: &str, default: Option<SerializedNode>) -> SerializedNode {
    let mut children = vec![ident(name).with_field("name")];
    if let Some(default) = default {
        children.push(token("="));
        children.push(default.with_field("default_value"));
    }
    node("parameter", children)
}

fn parameter_list(parameters: Vec<SerializedNode>) -> SerializedNode {
    node("parameter_list", delimited("(", parameters, ",", ")"))
}

/// `module name(parameters) body`
pub fn module_definition(
    name: &str,
    parameters: Vec<SerializedNode>,
    body: SerializedNode,
) -> SerializedNode {
    node(
        "module_definition",
        vec![
            token("module"),
            ident(name).with_field("name"),
            parameter_list(parameters).with_field("parameters"),
            body.with_field("body"),
        ],
    )
}

/// `function name(parameters) = value;`
pub fn function_definition(
    name: &str,
    parameters: Vec<SerializedNode>,
    value: SerializedNode,
) -> SerializedNode {
    node(
        "function_definition",
        vec![
            token("function"),
            ident(name).with_field("name"),
            parameter_list(parameters).with_field("parameters"),
            token("="),
            value.with_field("value"),
            token(";"),
        ],
    )
}

/// `include <path>`
pub fn include_statement(path: &str) -> SerializedNode {
    node(
        "include_statement",
        vec![
            token("include"),
            leaf("include_path", &format!("<{path}>")).with_field("path"),
        ],
    )
}

/// `use <path>`
pub fn use_statement(path: &str) -> SerializedNode {
    node(
        "use_statement",
        vec![
            token("use"),
            leaf("include_path", &format!("<{path}>")).with_field("path"),
        ],
    )
}

/// A statement prefixed by one of `! # % *`.
pub fn modified_statement(modifier: &str, statement: SerializedNode) -> SerializedNode {
    node(
        "modified_statement",
        vec![
            token(modifier).with_field("modifier"),
            statement.with_field("statement"),
        ],
    )
}

pub fn comment(text: &str) -> SerializedNode {
    leaf("comment", text)
}

/// A syntax error node covering `text`.
pub fn error(text: &str) -> SerializedNode {
    leaf("ERROR", text)
}
