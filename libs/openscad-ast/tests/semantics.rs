use std::collections::BTreeMap;

use openscad_ast::cst::builder::*;
use openscad_ast::cst::SerializedNode;
use openscad_ast::{
    parse_from_cst, AstNode, BinaryOp, ColorValue, Expression, Modifier, ModuleParameter,
    ParameterValue, Rotation,
};

fn parse(statements: Vec<SerializedNode>) -> Vec<AstNode> {
    parse_from_cst(&source_file(statements)).unwrap()
}

#[test]
fn if_else_if_else_chain() {
    // if (x > 2) cube(); else if (x > 1) sphere(); else cylinder();
    let ast = parse(vec![if_statement(
        binary(ident("x"), ">", number("2")),
        module_call("cube", vec![]),
        Some(if_statement(
            binary(ident("x"), ">", number("1")),
            module_call("sphere", vec![]),
            Some(module_call("cylinder", vec![])),
        )),
    )]);
    let [AstNode::If {
        condition,
        then_branch,
        else_branch: Some(else_branch),
        ..
    }] = &ast[..]
    else {
        panic!("Expected If, got {ast:?}");
    };
    assert!(matches!(condition, Expression::Binary { op: BinaryOp::Greater, .. }));
    assert!(matches!(then_branch[..], [AstNode::Cube { .. }]));
    let [AstNode::If {
        else_branch: Some(last),
        ..
    }] = &else_branch[..]
    else {
        panic!("Expected else-if, got {else_branch:?}");
    };
    assert!(matches!(last[..], [AstNode::Cylinder { .. }]));
}

#[test]
fn let_binds_by_name() {
    // let (b = a + 1, a = 2) cube(b);
    let ast = parse(vec![let_statement(
        vec![
            let_assignment("b", binary(ident("a"), "+", number("1"))),
            let_assignment("a", number("2")),
        ],
        module_call("cube", vec![arg(ident("b"))]),
    )]);
    let [AstNode::Let { assignments, body, .. }] = &ast[..] else {
        panic!("Expected Let, got {ast:?}");
    };
    let expected: BTreeMap<String, ParameterValue> = [
        (
            "a".to_string(),
            ParameterValue::Number(2.0),
        ),
        (
            "b".to_string(),
            ParameterValue::Expression(Expression::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expression::variable("a")),
                right: Box::new(Expression::number(1.0)),
            }),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(*assignments, expected);
    assert_eq!(body.len(), 1);
}

#[test]
fn module_definition_then_call() {
    // module ring(r = 10, w) { difference() { circle(r); circle(r - w); } }
    // ring(w = 2);
    let ast = parse(vec![
        module_definition(
            "ring",
            vec![parameter("r", Some(number("10"))), parameter("w", None)],
            block(vec![module_call_with_body(
                "difference",
                vec![],
                block(vec![
                    module_call("circle", vec![arg(ident("r"))]),
                    module_call("circle", vec![arg(binary(ident("r"), "-", ident("w")))]),
                ]),
            )]),
        ),
        module_call("ring", vec![named_arg("w", number("2"))]),
    ]);

    let [AstNode::ModuleDefinition {
        name,
        parameters,
        body,
        ..
    }, AstNode::ModuleInstantiation {
        name: called,
        arguments,
        ..
    }] = &ast[..]
    else {
        panic!("Expected definition and call, got {ast:?}");
    };
    assert_eq!(name, "ring");
    assert_eq!(called, "ring");
    assert_eq!(
        parameters[0],
        ModuleParameter {
            name: "r".into(),
            default_value: Some(ParameterValue::Number(10.0)),
        }
    );
    assert_eq!(parameters[1].default_value, None);
    assert_eq!(arguments[0].value, ParameterValue::Number(2.0));

    let [AstNode::Difference { children, .. }] = &body[..] else {
        panic!("Expected Difference, got {body:?}");
    };
    match &children[1] {
        AstNode::Circle { r: Some(r), .. } => {
            assert!(matches!(r, openscad_ast::Value::Expression(Expression::Binary { .. })))
        }
        other => panic!("Expected Circle, got {other:?}"),
    }
}

#[test]
fn function_definition_with_conditional() {
    // function sign(x) = x < 0 ? -1 : 1;
    let ast = parse(vec![function_definition(
        "sign",
        vec![parameter("x", None)],
        conditional(
            binary(ident("x"), "<", number("0")),
            unary("-", number("1")),
            number("1"),
        ),
    )]);
    match &ast[..] {
        [AstNode::FunctionDefinition { expression, .. }] => match expression {
            Expression::Conditional { then_branch, .. } => {
                assert_eq!(then_branch.as_number(), Some(-1.0));
            }
            other => panic!("Expected Conditional, got {other:?}"),
        },
        other => panic!("Expected FunctionDefinition, got {other:?}"),
    }
}

#[test]
fn modifiers_nest() {
    // !#cube();
    let ast = parse(vec![modified_statement(
        "!",
        modified_statement("#", module_call("cube", vec![])),
    )]);
    match &ast[..] {
        [AstNode::Modified {
            modifier: Modifier::ShowOnly,
            child,
            ..
        }] => assert!(matches!(
            **child,
            AstNode::Modified {
                modifier: Modifier::Highlight,
                ..
            }
        )),
        other => panic!("Expected Modified, got {other:?}"),
    }
}

#[test]
fn rotate_and_color_in_one_chain() {
    // color("red", 0.5) rotate([0, 90, 0]) square(5);
    let ast = parse(vec![
        module_call_open(
            "color",
            vec![arg(string("red")), arg(number("0.5"))],
        ),
        module_call_open(
            "rotate",
            vec![arg(array(vec![number("0"), number("90"), number("0")]))],
        ),
        module_call("square", vec![arg(number("5"))]),
    ]);
    let [AstNode::Color { color, children, .. }] = &ast[..] else {
        panic!("Expected Color, got {ast:?}");
    };
    assert_eq!(
        *color,
        ColorValue::Named {
            name: "red".into(),
            alpha: 0.5
        }
    );
    match &children[..] {
        [AstNode::Rotate { a, children, .. }] => {
            assert!(matches!(a, Rotation::Euler(v) if v.y == 90.0));
            assert!(matches!(children[..], [AstNode::Square { .. }]));
        }
        other => panic!("Expected Rotate, got {other:?}"),
    }
}

#[test]
fn echo_and_children() {
    // module wrap() { echo("wrapping"); children(0); }
    let ast = parse(vec![module_definition(
        "wrap",
        vec![],
        block(vec![
            module_call("echo", vec![arg(string("wrapping"))]),
            module_call("children", vec![arg(number("0"))]),
        ]),
    )]);
    let [AstNode::ModuleDefinition { body, .. }] = &ast[..] else {
        panic!("Expected ModuleDefinition, got {ast:?}");
    };
    match &body[..] {
        [AstNode::Echo { arguments, .. }, AstNode::Children { index, .. }] => {
            assert_eq!(arguments[0].value, ParameterValue::String("wrapping".into()));
            assert_eq!(*index, Some(ParameterValue::Number(0.0)));
        }
        other => panic!("Expected Echo and Children, got {other:?}"),
    }
}
