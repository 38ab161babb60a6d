//! Boundary Source Generation for Ferry
//!
//! Turns the exported functions of one native source file into a C++
//! translation unit that includes that file and re-exports every marked
//! function under a C-linkage symbol whose parameters and results are
//! boundary-safe.
//!
//! # Architecture
//!
//! ```text
//! BoundaryUnit (source name, platform, functions)
//!        ↓
//!    CxxCodegen    (prelude, wrappers, release helpers)
//!        ↓
//!  BoundarySource  (C++ text + exported symbol names)
//! ```
//!
//! Output is a pure function of the unit: the same functions and platform
//! always produce byte-identical text.

pub mod cxx;
mod context;

pub use context::CodegenContext;
pub use cxx::CxxCodegen;

use ferry_ir::{ExportedFunction, Platform};

/// Input to boundary generation.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryUnit<'a> {
    /// File name the generated source `#include`s (no directory).
    pub source_name: &'a str,
    /// Platform the artifact will be built for.
    pub platform: Platform,
    /// Exported functions in source order.
    pub functions: &'a [ExportedFunction],
}

/// Generated boundary translation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundarySource {
    /// C++ source text.
    pub code: String,
    /// Every symbol the unit exports, wrappers first, release helpers last.
    pub symbols: Vec<String>,
}

/// Generate the boundary source for `unit`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(source = unit.source_name, platform = %unit.platform, functions = unit.functions.len())
)]
pub fn emit_boundary_source(unit: &BoundaryUnit<'_>) -> BoundarySource {
    let source = CxxCodegen::generate(unit);
    tracing::debug!(
        bytes = source.code.len(),
        symbols = source.symbols.len(),
        "boundary source generated"
    );
    source
}
