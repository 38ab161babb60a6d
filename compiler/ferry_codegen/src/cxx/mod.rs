//! C++ Boundary Backend
//!
//! Emits one translation unit per native source file:
//!
//! ```text
//! banner + includes
//! FERRY_EXPORT define         (per platform)
//! array_handle<T> + helpers
//! #include "<source>"
//! one wrapper per export      (source order)
//! _ferry_release_<kind>       (kinds whose buffers the host must free)
//! ```

mod prelude;
mod wrapper;

pub use prelude::{CxxPrelude, EXPORT_MACRO, HANDLE_TO_VECTOR, VECTOR_TO_HANDLE};
pub use wrapper::emit_wrapper;

use crate::context::CodegenContext;
use crate::{BoundarySource, BoundaryUnit};

/// C++ boundary code generator.
pub struct CxxCodegen;

impl CxxCodegen {
    /// Generate the boundary translation unit for `unit`.
    pub fn generate(unit: &BoundaryUnit<'_>) -> BoundarySource {
        let mut ctx = CodegenContext::new(unit.platform);

        CxxPrelude::emit_header(&mut ctx, unit.source_name);
        CxxPrelude::emit_source_include(&mut ctx, unit.source_name);

        let mut symbols: Vec<String> = Vec::with_capacity(unit.functions.len());
        for function in unit.functions {
            emit_wrapper(&mut ctx, function);
            symbols.push(function.symbol());
        }
        symbols.extend(CxxPrelude::emit_release_functions(&mut ctx));

        BoundarySource {
            code: ctx.finish(),
            symbols,
        }
    }
}
