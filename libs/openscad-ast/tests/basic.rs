use glam::DVec3;
use openscad_ast::cst::builder::*;
use openscad_ast::cst::SerializedNode;
use openscad_ast::{
    parse_from_cst, AstNode, CubeSize, ForVariable, GenerateError, Iterable, NumericRange,
    ParameterValue, Value,
};

fn parse(statements: Vec<SerializedNode>) -> Vec<AstNode> {
    parse_from_cst(&source_file(statements)).unwrap()
}

fn vec3(x: &str, y: &str, z: &str) -> SerializedNode {
    array(vec![number(x), number(y), number(z)])
}

#[test]
fn cube_with_positional_size() {
    // cube(10);
    let ast = parse(vec![module_call("cube", vec![arg(number("10"))])]);
    assert_eq!(ast.len(), 1);
    match &ast[0] {
        AstNode::Cube { size, center, .. } => {
            assert_eq!(*size, CubeSize::Scalar(10.0));
            assert!(!center);
        }
        other => panic!("Expected Cube, got {other:?}"),
    }
}

#[test]
fn translate_with_open_child() {
    // translate([1,2,3]) cube(10);
    let ast = parse(vec![
        module_call_open("translate", vec![arg(vec3("1", "2", "3"))]),
        module_call("cube", vec![arg(number("10"))]),
    ]);
    assert_eq!(ast.len(), 1);
    match &ast[0] {
        AstNode::Translate { v, children, .. } => {
            assert_eq!(*v, Value::Literal(DVec3::new(1.0, 2.0, 3.0)));
            assert!(matches!(
                children[..],
                [AstNode::Cube { size: CubeSize::Scalar(s), .. }] if s == 10.0
            ));
        }
        other => panic!("Expected Translate, got {other:?}"),
    }
}

#[test]
fn translate_with_body_field() {
    // translate([1,2,3]) cube(10);  (child held in the body field)
    let ast = parse(vec![module_call_with_body(
        "translate",
        vec![arg(vec3("1", "2", "3"))],
        module_call("cube", vec![arg(number("10"))]),
    )]);
    assert!(matches!(
        &ast[..],
        [AstNode::Translate { children, .. }] if matches!(children[..], [AstNode::Cube { .. }])
    ));
}

#[test]
fn sphere_by_diameter() {
    // sphere(d=20);
    let ast = parse(vec![module_call("sphere", vec![named_arg("d", number("20"))])]);
    match &ast[..] {
        [AstNode::Sphere { r, d, .. }] => {
            assert_eq!(*r, None);
            assert_eq!(*d, Some(Value::Literal(20.0)));
        }
        other => panic!("Expected Sphere, got {other:?}"),
    }
}

#[test]
fn for_loop_over_stepped_range() {
    // for (i=[0:2:10]) translate([i,0,0]) cube(1);
    let ast = parse(vec![for_statement(
        vec![for_binding("i", range(number("0"), Some(number("2")), number("10")))],
        module_call_with_body(
            "translate",
            vec![arg(array(vec![ident("i"), number("0"), number("0")]))],
            module_call("cube", vec![arg(number("1"))]),
        ),
    )]);
    match &ast[..] {
        [AstNode::ForLoop { variables, body, .. }] => {
            assert_eq!(
                variables[..],
                [ForVariable {
                    variable: "i".into(),
                    iterable: Iterable::Range(NumericRange {
                        start: 0.0,
                        step: Some(2.0),
                        end: 10.0,
                    }),
                    step: Some(2.0),
                }]
            );
            assert!(matches!(
                &body[..],
                [AstNode::Translate { children, .. }] if children.len() == 1
            ));
        }
        other => panic!("Expected ForLoop, got {other:?}"),
    }
}

#[test]
fn special_variable_with_wrong_arity() {
    // $vpr = [1,2];
    let root = source_file(vec![assignment("$vpr", array(vec![number("1"), number("2")]))]);
    let err = parse_from_cst(&root).unwrap_err();
    match &err {
        GenerateError::InvalidSpecialVariable {
            name,
            expected,
            found,
            ..
        } => {
            assert_eq!(name, "$vpr");
            assert_eq!(expected.to_string(), "a 3-component vector");
            assert_eq!(found, "a 2-component vector");
        }
        other => panic!("Expected InvalidSpecialVariable, got {other:?}"),
    }
    assert!(err.to_string().contains("$vpr"));
}

#[test]
fn empty_union() {
    // union() { }
    let ast = parse(vec![module_call_with_body("union", vec![], block(vec![]))]);
    assert!(matches!(&ast[..], [AstNode::Union { children, .. }] if children.is_empty()));
}

#[test]
fn difference_keeps_source_order() {
    let ast = parse(vec![module_call_with_body(
        "difference",
        vec![],
        block(vec![
            module_call("cube", vec![arg(number("10"))]),
            module_call("sphere", vec![arg(number("6"))]),
            module_call("cylinder", vec![named_arg("h", number("20"))]),
        ]),
    )]);
    let [AstNode::Difference { children, .. }] = &ast[..] else {
        panic!("Expected Difference, got {ast:?}");
    };
    let names: Vec<&str> = children.iter().map(AstNode::name).collect();
    assert_eq!(names, ["cube", "sphere", "cylinder"]);
}

#[test]
fn unknown_module_is_kept_as_instantiation() {
    let ast = parse(vec![module_call_with_body(
        "rounded_box",
        vec![arg(number("5")), named_arg("fillet", number("1"))],
        block(vec![module_call("cube", vec![])]),
    )]);
    match &ast[..] {
        [AstNode::ModuleInstantiation {
            name,
            arguments,
            children,
            ..
        }] => {
            assert_eq!(name, "rounded_box");
            assert_eq!(arguments.len(), 2);
            assert_eq!(arguments[1].name.as_deref(), Some("fillet"));
            assert_eq!(arguments[1].value, ParameterValue::Number(1.0));
            assert_eq!(children.len(), 1);
        }
        other => panic!("Expected ModuleInstantiation, got {other:?}"),
    }
}

#[test]
fn locations_cover_statement_text() {
    let root = source_file(vec![
        module_call("cube", vec![]),
        module_call("sphere", vec![]),
    ]);
    let ast = parse_from_cst(&root).unwrap();
    let first = ast[0].location();
    let second = ast[1].location();
    assert_eq!(first.start.offset, 0);
    assert_eq!(&root.text[first.start.offset..first.end.offset], "cube ( ) ;");
    assert!(second.start.offset > first.end.offset);
}
