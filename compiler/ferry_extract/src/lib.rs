//! Signature extraction for exported C++ functions.
//!
//! Scans one source file line by line. A line carrying the export marker
//! (outside preprocessor directives) announces that the next signature is to
//! be exported; the extractor rebuilds it into an `ExportedFunction`.
//!
//! ```text
//! //ferry::export
//! std::vector<long long> sequence(int n,
//!                                 bool strict = true)
//! {
//! ```
//!
//! Parameter lists may span several lines. The record produced for a split
//! list is identical to the one produced for the same list on one line.

mod error;
mod inline;
mod params;
mod scanner;

pub use error::ExtractError;
pub use inline::mark_inline_source;

use ferry_ir::{ExportedFunction, EXPORT_MARKER};

/// Extraction settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Literal text that flags the next function for export.
    pub marker: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            marker: EXPORT_MARKER.to_string(),
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

/// Extract every marked function from `source`, in file order.
///
/// Fails on the first malformed signature; no partial list is returned.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn extract(
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<ExportedFunction>, ExtractError> {
    let functions = scanner::SignatureScanner::new(&options.marker).run(source)?;
    tracing::debug!(count = functions.len(), "extraction complete");
    Ok(functions)
}
