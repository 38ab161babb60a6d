use pretty_assertions::assert_eq;

use super::*;
use ferry_ir::EXPORT_MARKER;

fn scan(source: &str) -> Result<Vec<ExportedFunction>, ExtractError> {
    SignatureScanner::new(EXPORT_MARKER).run(source)
}

fn names(functions: &[ExportedFunction]) -> Vec<&str> {
    functions.iter().map(ExportedFunction::name).collect()
}

#[test]
fn unmarked_functions_are_ignored() {
    let src = "int add(int a, int b) {\n    return a + b;\n}\n";
    assert_eq!(scan(src).unwrap(), Vec::new());
}

#[test]
fn one_line_signature() {
    let src = "//ferry::export\nint add(int a, int b) {\n    return a + b;\n}\n";
    let functions = scan(src).unwrap();
    assert_eq!(functions.len(), 1);
    let add = &functions[0];
    assert_eq!(add.name(), "add");
    assert_eq!(add.return_type().as_str(), "int");
    assert_eq!(
        add.params()
            .iter()
            .map(|p| (p.ty.as_str(), p.name.as_str()))
            .collect::<Vec<_>>(),
        vec![("int", "a"), ("int", "b")]
    );
}

#[test]
fn brace_on_next_line_is_consumed() {
    let src = "//ferry::export\nint one()\n{\n    return 1;\n}\n//ferry::export\nint two()\n{\n    return 2;\n}\n";
    assert_eq!(names(&scan(src).unwrap()), vec!["one", "two"]);
}

#[test]
fn marker_right_after_prototype_is_not_swallowed() {
    let src = "//ferry::export\nint one();\n//ferry::export\nint two() { return 2; }\n";
    assert_eq!(names(&scan(src).unwrap()), vec!["one", "two"]);
}

#[test]
fn functions_come_out_in_file_order() {
    let src = "\
//ferry::export
double c(double x) { return x; }

int helper() { return 0; }

//ferry::export
int a(int x) { return x; }
//ferry::export
bool b(bool x) { return x; }
";
    assert_eq!(names(&scan(src).unwrap()), vec!["c", "a", "b"]);
}

#[test]
fn marker_in_preprocessor_line_is_ignored() {
    let src = "#define TAG \"ferry::export\"\nint f(int x) { return x; }\n";
    assert!(scan(src).unwrap().is_empty());
}

#[test]
fn blank_lines_between_marker_and_header_are_skipped() {
    let src = "//ferry::export\n\n//ferry::export\nint f(int x) { return x; }\n";
    assert_eq!(names(&scan(src).unwrap()), vec!["f"]);
}

#[test]
fn multi_line_parameters() {
    let src = "\
//ferry::export
std::vector<long long> sequence(int n,
                                bool strict = true)
{
    return {};
}
";
    let functions = scan(src).unwrap();
    let f = &functions[0];
    assert_eq!(f.name(), "sequence");
    assert_eq!(f.return_type().as_str(), "std::vector<longlong>");
    assert!(f.return_is_array());
    assert_eq!(f.params().len(), 2);
    assert_eq!(f.params()[1].name, "strict");
    assert_eq!(
        f.params()[1].default.as_ref().map(|d| d.host()),
        Some("True")
    );
}

#[test]
fn parameters_one_per_line_with_closing_paren_alone() {
    let src = "\
//ferry::export
double weighted(
    std::vector<double> xs,
    std::vector<double> ws
) {
    return 0.0;
}
";
    let f = &scan(src).unwrap()[0];
    assert_eq!(f.param_array_indices(), &[1, 2]);
    assert_eq!(f.params()[1].name, "ws");
}

#[test]
fn compound_long_is_one_token() {
    let src = "//ferry::export\nlong long twice(long long x) { return 2 * x; }\n";
    let f = &scan(src).unwrap()[0];
    assert_eq!(f.return_type().as_str(), "longlong");
    assert_eq!(f.params().len(), 1);
    assert_eq!(f.params()[0].ty.as_str(), "longlong");
    assert_eq!(f.params()[0].name, "x");
}

#[test]
fn trailing_comments_do_not_become_parameters() {
    let src = "//ferry::export\nint f(int a, // first\n      int b) // second\n{\n    return a;\n}\n";
    let f = &scan(src).unwrap()[0];
    assert_eq!(f.params().len(), 2);
    assert_eq!(f.params()[1].name, "b");
}

// === Malformed input ===

#[test]
fn marker_at_end_of_file() {
    let src = "int f();\n//ferry::export\n\n";
    assert_eq!(
        scan(src),
        Err(ExtractError::MissingSignature { marker_line: 2 })
    );
}

#[test]
fn header_without_parenthesis() {
    let src = "//ferry::export\nint value = 3;\n";
    let err = scan(src).unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(matches!(err, ExtractError::MissingParameterList { .. }));
}

#[test]
fn unterminated_parameter_list_names_the_function() {
    let src = "//ferry::export\nint broken(int a,\n    int b,\n";
    let err = scan(src).unwrap_err();
    assert_eq!(
        err,
        ExtractError::UnterminatedParameters {
            function: "broken".to_string(),
            line: 2,
        }
    );
    assert_eq!(err.function(), Some("broken"));
}
