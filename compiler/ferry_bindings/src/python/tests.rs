use super::*;
use crate::module::assemble;
use ferry_ir::{DefaultLiteral, ExportedFunction, Parameter, TypeToken};
use pretty_assertions::assert_eq;

fn param(ty: &str, name: &str) -> Parameter {
    Parameter::new(TypeToken::new(ty), name)
}

fn function(ret: &str, name: &str, params: Vec<Parameter>) -> ExportedFunction {
    ExportedFunction::new(name, TypeToken::new(ret), params)
}

/// Text after the handle record is written.
fn bindings_section<'a>(text: &'a str, library: &str) -> &'a str {
    let marker = format!("_record.write(str({library}._handle))\n\n");
    let start = text.find(&marker).map_or(0, |i| i + marker.len());
    &text[start..]
}

fn reference_module() -> BindingModule {
    let functions = [
        function("std::vector<long long>", "q", vec![param("int", "n")]),
        function("double", "sum", vec![param("std::vector<double>", "xs")]),
        function("int", "add", vec![param("int", "a"), param("int", "b")]),
    ];
    assemble("model", "model_ext.so", &functions)
}

#[test]
fn reference_bindings() {
    let text = render_python(&reference_module());
    assert_eq!(
        bindings_section(&text, "model"),
        "\
_ferry_release_int64 = model._ferry_release_int64
_ferry_release_int64.argtypes = [handle_int64]
_ferry_release_int64.restype = None

q_ = model._q
q_.argtypes = [c_int]
q_.restype = handle_int64


def q(n):
    _result = q_(n)
    try:
        return _result.to_array()
    finally:
        _ferry_release_int64(_result)


sum_ = model._sum
sum_.argtypes = [handle_float64]
sum_.restype = c_double


def sum(xs):
    return sum_(handle_float64.from_sequence(xs))


add = model._add
add.argtypes = [c_int, c_int]
add.restype = c_int
"
    );
}

#[test]
fn loader_uses_artifact_and_record() {
    let text = render_python(&reference_module());
    assert!(text.starts_with("# Generated by ferry for model_ext.so. Do not edit.\n"));
    assert!(text.contains("model = ctypes.CDLL(os.path.join(_here, \"model_ext.so\"))\n"));
    assert!(text.contains("with open(os.path.join(_here, \"model_handle.txt\"), \"w\") as _record:\n"));
}

#[test]
fn handle_classes_only_for_used_kinds() {
    let text = render_python(&reference_module());
    assert!(text.contains("class handle_int64(_ArrayHandle):\n    _element = c_longlong\n"));
    assert!(text.contains("class handle_float64(_ArrayHandle):\n"));
    assert!(text.contains("    _fields_ = [(\"arr\", POINTER(c_double)), (\"size\", c_int)]\n"));
    assert!(!text.contains("class handle_bool"));
}

#[test]
fn scalar_only_module_has_no_proxies() {
    let module = assemble("calc", "calc_ext.dll", &[function("int", "add", vec![param("int", "a")])]);
    let text = render_python(&module);
    assert!(!text.contains("\ndef "));
    assert!(text.ends_with("add = calc._add\nadd.argtypes = [c_int]\nadd.restype = c_int\n"));
}

#[test]
fn library_renamed_when_function_owns_stem() {
    let module = assemble(
        "model",
        "model_ext.so",
        &[function("std::vector<int>", "model", vec![param("int", "n")])],
    );
    let text = render_python(&module);
    assert!(text.contains("model_lib = ctypes.CDLL("));
    assert!(text.contains("model_ = model_lib._model\n"));
    assert!(text.contains("def model(n):\n"));
    assert!(!text.contains("\nmodel = "));
}

#[test]
fn proxy_defaults_and_pass_through() {
    let module = assemble(
        "m",
        "m_ext.so",
        &[
            function(
                "void",
                "fill",
                vec![
                    param("std::vector<bool>", "mask"),
                    param("double*", "out"),
                    param("bool", "strict").with_default(DefaultLiteral::from_native("true")),
                ],
            ),
            function("array_handle<int>", "ids", vec![]),
        ],
    );
    let text = render_python(&module);
    assert!(text.contains("fill_.argtypes = [handle_bool, POINTER(c_double), c_bool]\n"));
    assert!(text.contains(
        "def fill(mask, out, strict=True):\n    fill_(handle_bool.from_sequence(mask), out, strict)\n"
    ));
    assert!(text.contains("def ids():\n    return ids_().to_array()\n"));
    assert!(!text.contains("_ferry_release"));
}

#[test]
fn untranslated_types_skip_signature_lines() {
    let module = assemble(
        "m",
        "m_ext.so",
        &[function("unsigned int", "mix", vec![param("unsigned int", "seed")])],
    );
    let text = render_python(&module);
    assert!(text.contains("mix = m._mix\n# argtypes omitted: untranslated type `unsigned int`\n"));
    assert!(text.contains("# restype omitted: untranslated type `unsigned int`\n"));
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render_python(&reference_module()), render_python(&reference_module()));
}

#[test]
fn reserved_names_render_suffixed() {
    let functions = [
        function("int", "open", vec![param("int", "x")]),
        function("double", "mean", vec![param("std::vector<double>", "from")]),
    ];
    let text = render_python(&assemble("model", "model_ext.so", &functions));

    assert!(text.contains("open_ = model._open\n"));
    assert!(text.contains("with open(os.path.join(_here, \"model_handle.txt\"), \"w\") as _record:\n"));
    assert!(text.contains(
        "def mean(from_):\n    return mean_(handle_float64.from_sequence(from_))\n"
    ));
}
