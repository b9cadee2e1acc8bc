use glam::DVec3;
use openscad_ast::cst::builder::*;
use openscad_ast::cst::SerializedNode;
use openscad_ast::generator::ValueExtractor;
use openscad_ast::{parse_from_cst, parse_from_json, AstNode, CubeSize, ParameterValue, Value};
use proptest::prelude::*;

/// A numeric literal as the grammar emits it: negatives are unary minus.
fn literal(n: f64) -> SerializedNode {
    if n.is_sign_negative() && n != 0.0 {
        unary("-", number(&format!("{}", -n)))
    } else {
        number(&format!("{}", n))
    }
}

fn component() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn generate_one(statement: SerializedNode) -> AstNode {
    let mut ast = parse_from_cst(&source_file(vec![statement])).unwrap();
    assert_eq!(ast.len(), 1);
    ast.remove(0)
}

fn transform_vector(name: &str, x: f64, y: f64) -> DVec3 {
    let node = generate_one(module_call_with_body(
        name,
        vec![arg(array(vec![literal(x), literal(y)]))],
        module_call("cube", vec![]),
    ));
    let v = match node {
        AstNode::Translate { v, .. } | AstNode::Scale { v, .. } | AstNode::Mirror { v, .. } => v,
        other => panic!("Expected a vector transform, got {other:?}"),
    };
    match v {
        Value::Literal(v) => v,
        Value::Expression(e) => panic!("Expected literal vector, got {e:?}"),
    }
}

proptest! {
    #[test]
    fn vector_literal_round_trips(a in component(), b in component(), c in component()) {
        let node = finish(array(vec![literal(a), literal(b), literal(c)]));
        let value = ValueExtractor::new(&node.text).value(&node);
        prop_assert_eq!(value, Some(ParameterValue::Vector3(DVec3::new(a, b, c))));
    }

    #[test]
    fn translate_and_mirror_pad_z_with_zero(x in component(), y in component()) {
        prop_assert_eq!(transform_vector("translate", x, y), DVec3::new(x, y, 0.0));
        prop_assert_eq!(transform_vector("mirror", x, y), DVec3::new(x, y, 0.0));
    }

    #[test]
    fn scale_pads_z_with_one(x in component(), y in component()) {
        prop_assert_eq!(transform_vector("scale", x, y), DVec3::new(x, y, 1.0));
    }

    #[test]
    fn radius_and_diameter_are_exclusive(
        args in prop::collection::vec((prop::bool::ANY, 1u32..100), 0..6),
        shape in prop::sample::select(vec!["sphere", "circle", "cylinder"]),
    ) {
        let arguments = args
            .iter()
            .map(|&(diameter, n)| named_arg(if diameter { "d" } else { "r" }, number(&n.to_string())))
            .collect();
        let (r, d) = match generate_one(module_call(shape, arguments)) {
            AstNode::Sphere { r, d, .. }
            | AstNode::Circle { r, d, .. }
            | AstNode::Cylinder { r, d, .. } => (r, d),
            other => panic!("Expected a round shape, got {other:?}"),
        };
        prop_assert!(r.is_some() != d.is_some());
        let expect_diameter = args.last().map(|&(diameter, _)| diameter).unwrap_or(false);
        prop_assert_eq!(d.is_some(), expect_diameter);
    }
}

#[test]
fn json_tree_matches_built_tree() {
    let root = source_file(vec![
        module_call_open("translate", vec![arg(array(vec![number("1"), number("2"), number("3")]))]),
        module_call("cube", vec![arg(number("10")), named_arg("center", boolean(true))]),
    ]);
    let json = serde_json::to_string(&root).unwrap();
    assert_eq!(parse_from_json(&json).unwrap(), parse_from_cst(&root).unwrap());
}

#[test]
fn web_tree_sitter_json() {
    // cube(10);
    let json = r#"{
        "type": "source_file", "text": "cube(10);",
        "startIndex": 0, "endIndex": 9,
        "startPosition": {"row": 0, "column": 0},
        "endPosition": {"row": 0, "column": 9},
        "isNamed": true,
        "children": [{
            "type": "module_instantiation", "text": "cube(10);",
            "startIndex": 0, "endIndex": 9,
            "startPosition": {"row": 0, "column": 0},
            "endPosition": {"row": 0, "column": 9},
            "isNamed": true,
            "children": [
                {"type": "identifier", "text": "cube", "fieldName": "name",
                 "startIndex": 0, "endIndex": 4,
                 "startPosition": {"row": 0, "column": 0},
                 "endPosition": {"row": 0, "column": 4}},
                {"type": "arguments", "text": "(10)", "fieldName": "arguments",
                 "startIndex": 4, "endIndex": 8,
                 "startPosition": {"row": 0, "column": 4},
                 "endPosition": {"row": 0, "column": 8},
                 "children": [
                    {"type": "(", "text": "(", "isNamed": false},
                    {"type": "number", "text": "10",
                     "startIndex": 5, "endIndex": 7,
                     "startPosition": {"row": 0, "column": 5},
                     "endPosition": {"row": 0, "column": 7}},
                    {"type": ")", "text": ")", "isNamed": false}
                 ]},
                {"type": ";", "text": ";", "isNamed": false}
            ]
        }]
    }"#;
    let ast = parse_from_json(json).unwrap();
    match &ast[..] {
        [AstNode::Cube {
            size: CubeSize::Scalar(s),
            location,
            ..
        }] => {
            assert_eq!(*s, 10.0);
            assert_eq!(location.start.offset, 0);
            assert_eq!(location.end.offset, 9);
            assert_eq!(location.end.column, 9);
        }
        other => panic!("Expected Cube, got {other:?}"),
    }
}
