//! Wrapper Emission
//!
//! One `extern "C"` definition per exported function. The wrapper carries
//! the boundary symbol (`_name`), takes handles in place of native vectors,
//! rebuilds each vector by copy into a named local before the call and
//! copies an array result into a fresh handle the host releases later.
//!
//! The rebuilt vectors are lvalues, so native parameters declared as
//! `std::vector<T>&` bind to them as well as `const&` and by-value ones.

use rustc_hash::FxHashSet;

use ferry_ir::ExportedFunction;
use ferry_types::{BoundaryType, TypeTranslator};

use super::prelude::{EXPORT_MACRO, HANDLE_TO_VECTOR, VECTOR_TO_HANDLE};
use crate::context::CodegenContext;

/// Emit the boundary wrapper for `function`.
///
/// Requests the release function for the returned element kind when the
/// wrapper allocates.
pub fn emit_wrapper(ctx: &mut CodegenContext, function: &ExportedFunction) {
    let ret = TypeTranslator::to_boundary(function.return_type());
    let params: Vec<String> = function
        .params()
        .iter()
        .map(|param| format!("{} {}", TypeTranslator::to_boundary(&param.ty), param.name))
        .collect();

    ctx.line(&format!(
        "{EXPORT_MACRO} {ret} {}({})",
        function.symbol(),
        params.join(", ")
    ));
    ctx.open_block();

    let mut taken: FxHashSet<String> = function.params().iter().map(|p| p.name.clone()).collect();
    taken.insert(function.name().to_string());
    let mut args = Vec::with_capacity(function.params().len());
    for (i, param) in function.params().iter().enumerate() {
        let element = if function.is_array_param(i + 1) {
            param.ty.array_element()
        } else {
            None
        };
        let Some(element) = element else {
            args.push(param.name.clone());
            continue;
        };
        let local = vector_local(&param.name, &taken);
        taken.insert(local.clone());
        ctx.line(&format!(
            "std::vector<{0}> {local} = {HANDLE_TO_VECTOR}<{0}>({1});",
            element.c_spelling(),
            param.name
        ));
        args.push(local);
    }
    let call = format!("{}({})", function.name(), args.join(", "));

    match ret {
        BoundaryType::Void => ctx.line(&format!("{call};")),
        BoundaryType::Handle(kind) if function.return_is_array() => {
            ctx.line(&format!(
                "return {VECTOR_TO_HANDLE}<{}>({call});",
                kind.boundary_c_type()
            ));
            ctx.request_release(kind);
        }
        _ => ctx.line(&format!("return {call};")),
    }

    ctx.close_block("");
    ctx.blank();
}

/// Name of the local holding the vector rebuilt from `param`, distinct
/// from every parameter, earlier local and the called function.
fn vector_local(param: &str, taken: &FxHashSet<String>) -> String {
    let mut local = format!("{param}_vec");
    while taken.contains(&local) {
        local.push('_');
    }
    local
}
