use super::*;
use pretty_assertions::assert_eq;

fn param(ty: &str, name: &str) -> Parameter {
    Parameter::new(TypeToken::new(ty), name)
}

#[test]
fn scalar_function_has_no_array_positions() {
    let f = ExportedFunction::new(
        "add",
        TypeToken::new("int"),
        vec![param("int", "a"), param("int", "b")],
    );
    assert!(f.param_array_indices().is_empty());
    assert!(!f.return_is_array());
    assert!(!f.uses_arrays());
    assert_eq!(f.symbol(), "_add");
}

#[test]
fn array_positions_are_one_based() {
    let f = ExportedFunction::new(
        "scale",
        TypeToken::new("std::vector<double>"),
        vec![param("double", "factor"), param("std::vector<double>", "xs")],
    );
    assert_eq!(f.param_array_indices(), &[2]);
    assert!(f.is_array_param(2));
    assert!(!f.is_array_param(1));
    assert!(f.return_is_array());
    assert!(f.uses_arrays());
}

#[test]
fn handle_params_are_tracked_separately() {
    let f = ExportedFunction::new(
        "sum_raw",
        TypeToken::new("double"),
        vec![param("array_handle<double>", "xs")],
    );
    assert!(f.param_array_indices().is_empty());
    assert_eq!(f.param_handle_indices(), &[1]);
    assert!(f.is_handle_param(1));
    assert!(f.uses_arrays());
}

#[test]
fn boolean_defaults_are_respelled() {
    assert_eq!(DefaultLiteral::from_native(" true ").host(), "True");
    assert_eq!(DefaultLiteral::from_native("false").host(), "False");
}

#[test]
fn other_defaults_are_carried_verbatim() {
    let lit = DefaultLiteral::from_native("2.5");
    assert_eq!(lit.native(), "2.5");
    assert_eq!(lit.host(), "2.5");
    assert_eq!(DefaultLiteral::from_native("trueish").host(), "trueish");
}

#[test]
fn display_lists_signature() {
    let f = ExportedFunction::new(
        "clip",
        TypeToken::new("int"),
        vec![
            param("int", "x"),
            param("bool", "strict").with_default(DefaultLiteral::from_native("true")),
        ],
    );
    assert_eq!(f.to_string(), "clip(int x, bool strict = true) -> int");
}
