//! Boundary Prelude
//!
//! Fixed C++ text placed ahead of the wrappers:
//!
//! - **Export macro** spelled for the target platform
//! - **`array_handle<T>`**, the `{ T* arr; int size; }` record that carries
//!   arrays across the boundary
//! - **Conversion helpers** between `std::vector<U>` and `array_handle<T>`,
//!   converting element by element so `float` or `short` vectors widen into
//!   their boundary kind
//! - **Release functions** freeing buffers that wrappers hand to the host

use ferry_ir::{ElementKind, HANDLE_TEMPLATE};

use crate::context::CodegenContext;

/// Name of the export macro used on every boundary definition.
pub const EXPORT_MACRO: &str = "FERRY_EXPORT";

/// Helper converting a native vector into a freshly allocated handle.
pub const VECTOR_TO_HANDLE: &str = "ferry_vector_to_handle";

/// Helper converting a handle into a native vector (copying).
pub const HANDLE_TO_VECTOR: &str = "ferry_handle_to_vector";

/// Prelude code generator.
pub struct CxxPrelude;

impl CxxPrelude {
    /// Emit the banner, includes, export macro, handle record and helpers.
    pub fn emit_header(ctx: &mut CodegenContext, source_name: &str) {
        ctx.line(&format!("// Generated by ferry from {source_name}. Do not edit."));
        ctx.blank();
        ctx.line("#include <cstddef>");
        ctx.line("#include <vector>");
        ctx.blank();
        let linkage = ctx.platform.export_linkage();
        ctx.line(&format!("#define {EXPORT_MACRO} {linkage}"));
        ctx.blank();

        ctx.line("template <typename T>");
        ctx.line(&format!("struct {HANDLE_TEMPLATE}"));
        ctx.open_block();
        ctx.line("T* arr;");
        ctx.line("int size;");
        ctx.close_block(";");
        ctx.blank();

        Self::emit_vector_to_handle(ctx);
        Self::emit_handle_to_vector(ctx);
    }

    /// Emit `#include` of the user's native source.
    pub fn emit_source_include(ctx: &mut CodegenContext, source_name: &str) {
        ctx.line(&format!("#include \"{source_name}\""));
        ctx.blank();
    }

    /// Emit the release function for every kind a wrapper requested, in
    /// `ElementKind::all()` order. Returns the exported symbols.
    pub fn emit_release_functions(ctx: &mut CodegenContext) -> Vec<String> {
        let mut symbols = Vec::new();
        for kind in ElementKind::all() {
            if !ctx.release_requested(kind) {
                continue;
            }
            let symbol = kind.release_symbol();
            ctx.line(&format!(
                "{EXPORT_MACRO} void {symbol}({HANDLE_TEMPLATE}<{}> handle)",
                kind.boundary_c_type()
            ));
            ctx.open_block();
            ctx.line("delete[] handle.arr;");
            ctx.close_block("");
            ctx.blank();
            symbols.push(symbol);
        }
        symbols
    }

    fn emit_vector_to_handle(ctx: &mut CodegenContext) {
        ctx.line("template <typename T, typename U>");
        ctx.line(&format!(
            "{HANDLE_TEMPLATE}<T> {VECTOR_TO_HANDLE}(const std::vector<U>& vec)"
        ));
        ctx.open_block();
        ctx.line(&format!("{HANDLE_TEMPLATE}<T> out;"));
        ctx.line("out.size = static_cast<int>(vec.size());");
        ctx.line("out.arr = vec.empty() ? nullptr : new T[vec.size()];");
        ctx.line("for (std::size_t i = 0; i < vec.size(); ++i)");
        ctx.open_block();
        ctx.line("out.arr[i] = static_cast<T>(vec[i]);");
        ctx.close_block("");
        ctx.line("return out;");
        ctx.close_block("");
        ctx.blank();
    }

    fn emit_handle_to_vector(ctx: &mut CodegenContext) {
        ctx.line("template <typename U, typename T>");
        ctx.line(&format!(
            "std::vector<U> {HANDLE_TO_VECTOR}(const {HANDLE_TEMPLATE}<T>& handle)"
        ));
        ctx.open_block();
        ctx.line("std::vector<U> out;");
        ctx.line("if (handle.arr == nullptr || handle.size <= 0)");
        ctx.open_block();
        ctx.line("return out;");
        ctx.close_block("");
        ctx.line("out.reserve(static_cast<std::size_t>(handle.size));");
        ctx.line("for (int i = 0; i < handle.size; ++i)");
        ctx.open_block();
        ctx.line("out.push_back(static_cast<U>(handle.arr[i]));");
        ctx.close_block("");
        ctx.line("return out;");
        ctx.close_block("");
        ctx.blank();
    }
}
