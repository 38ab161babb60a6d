//! Ferry IR - Exported Signature Records
//!
//! This crate holds the data that flows between the ferry pipeline stages:
//! - `TypeToken` for normalized native type spellings
//! - `ElementKind` / `NativeElement` for array element classification
//! - `Parameter` and `ExportedFunction` for one marked native function
//!
//! # Pipeline
//!
//! ```text
//! native source ──► ferry_extract ──► Vec<ExportedFunction>
//!                                          │
//!                         ┌────────────────┴────────────────┐
//!                         ▼                                 ▼
//!                  ferry_codegen                      ferry_bindings
//!              (boundary C++ source)               (host proxy module)
//! ```
//!
//! Records are built once per extraction pass and never mutated afterwards.
//! Both consumers read the same record, so naming and ABI decisions that
//! both sides must agree on (`ExportedFunction::symbol`, array positions)
//! live here rather than in either consumer.

mod function;
mod platform;
mod token;

pub use function::{DefaultLiteral, ExportedFunction, Parameter};
pub use platform::{Platform, UnknownPlatform};
pub use token::{ElementKind, NativeElement, TypeToken, HANDLE_TEMPLATE};

/// Default export marker recognized by the extractor.
pub const EXPORT_MARKER: &str = "ferry::export";
