// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Extraction through the public API.

use ferry_extract::{extract, mark_inline_source, ExtractError, ExtractOptions};
use ferry_ir::ExportedFunction;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const HOFSTADTER: &str = r"
#include <vector>

//ferry::export
std::vector<long long> generateHofstadterQSequence(int n) {
    if (n <= 0) {
        return {};
    }
    std::vector<long long> q;
    q.reserve(n);
    q.push_back(1);
    if (n >= 2) {
        q.push_back(1);
    }
    for (int i = 2; i < n; ++i) {
        q.push_back(q[i - q[i - 1]] + q[i - q[i - 2]]);
    }
    return q;
}

//ferry::export
double sum(std::vector<double> xs)
{
    double total = 0.0;
    for (double x : xs) total += x;
    return total;
}

//ferry::export
int add(int a, int b) { return a + b; }
";

#[test]
fn reference_file() {
    let functions = extract(HOFSTADTER, &ExtractOptions::default()).unwrap();
    let summary: Vec<String> = functions.iter().map(ToString::to_string).collect();
    assert_eq!(
        summary,
        vec![
            "generateHofstadterQSequence(int n) -> std::vector<longlong>",
            "sum(std::vector<double> xs) -> double",
            "add(int a, int b) -> int",
        ]
    );
    assert!(functions[0].return_is_array());
    assert_eq!(functions[1].param_array_indices(), &[1]);
    assert!(!functions[2].uses_arrays());
}

#[test]
fn custom_marker() {
    let src = "// @bind\nint one() { return 1; }\n//ferry::export\nint two() { return 2; }\n";
    let options = ExtractOptions::default().with_marker("@bind");
    let functions = extract(src, &options).unwrap();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name(), "one");
}

#[test]
fn inline_snippet_round_trip() {
    let marked = mark_inline_source("int twice(int x) { return 2 * x; }", "ferry::export");
    let functions = extract(&marked, &ExtractOptions::default()).unwrap();
    assert_eq!(functions[0].name(), "twice");
}

#[test]
fn malformed_signature_message_names_function() {
    let err = extract("//ferry::export\nint broken(int a,\n", &ExtractOptions::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter list of exported function `broken` (line 2) is not closed before end of file"
    );
    assert!(matches!(err, ExtractError::UnterminatedParameters { .. }));
}

// === One-line and split parameter lists agree ===

fn type_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "int",
        "double",
        "bool",
        "long long",
        "int*",
        "std::vector<double>",
        "std::vector<int>",
        "std::vector<long long>",
        "std::vector<bool>",
    ])
}

fn params_strategy() -> impl Strategy<Value = Vec<(&'static str, bool)>> {
    prop::collection::vec((type_strategy(), any::<bool>()), 0..6)
}

fn render_params(params: &[(&str, bool)]) -> Vec<String> {
    params
        .iter()
        .enumerate()
        .map(|(i, (ty, has_default))| {
            if *has_default {
                format!("{ty} p{i} = true")
            } else {
                format!("{ty} p{i}")
            }
        })
        .collect()
}

fn extract_one(src: &str) -> ExportedFunction {
    let mut functions = extract(src, &ExtractOptions::default()).unwrap();
    assert_eq!(functions.len(), 1);
    functions.remove(0)
}

proptest! {
    #[test]
    fn split_list_matches_one_line(params in params_strategy(), brace_on_own_line in any::<bool>()) {
        let rendered = render_params(&params);
        let body = if brace_on_own_line { "\n{\n    return 0;\n}\n" } else { " {\n    return 0;\n}\n" };

        let one_line = format!("//ferry::export\nint f({}){body}", rendered.join(", "));
        let split = format!("//ferry::export\nint f({}){body}", rendered.join(",\n      "));

        prop_assert_eq!(extract_one(&one_line), extract_one(&split));
    }

    #[test]
    fn n_markers_give_n_records(count in 0usize..8) {
        let src: String = (0..count)
            .map(|i| format!("//ferry::export\nint f{i}(int x)\n{{\n    return x;\n}}\n"))
            .collect();
        let functions = extract(&src, &ExtractOptions::default()).unwrap();
        let names: Vec<String> = functions.iter().map(|f| f.name().to_string()).collect();
        let expected: Vec<String> = (0..count).map(|i| format!("f{i}")).collect();
        prop_assert_eq!(names, expected);
    }
}
