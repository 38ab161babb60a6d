//! Host Binding Assembly for Ferry
//!
//! Builds the host-side view of one native source file's exports and renders
//! it as a Python `ctypes` module.
//!
//! # Architecture
//!
//! ```text
//! [ExportedFunction]
//!        ↓
//!     assemble        (names, descriptors, raw + proxy split)
//!        ↓
//!   BindingModule     (structured: name → binding)
//!        ↓
//!   render_python     (module text written next to the artifact)
//! ```
//!
//! Scalar-only functions bind straight to their boundary symbol. Functions
//! touching arrays get a raw handle-level binding and a proxy under the
//! function's own name that converts host sequences to handles and back.

mod module;
mod naming;
mod python;

pub use module::{
    assemble, handle_record_name, Binding, BindingModule, ForeignBinding, HostParam,
    ProxyBinding, HANDLE_RECORD_SUFFIX,
};
pub use naming::sanitize_identifier;
pub use python::render_python;
