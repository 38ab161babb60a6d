//! Type Translation: Native Tokens → Boundary and Host Types
//!
//! Every `TypeToken` in an exported signature is looked at from two sides:
//!
//! - **Boundary**: the C++ type used in the `extern "C"` wrapper. Dynamic
//!   arrays become `array_handle<T>`, scalars keep their C spelling.
//! - **Host**: the ctypes descriptor used by the generated Python module.
//!
//! Translation is best effort. A token outside the vocabulary comes back
//! verbatim on both sides; the C++ compiler is the one that rejects it.

mod translator;

pub use translator::{BoundaryType, HostType, TypeTranslator};
