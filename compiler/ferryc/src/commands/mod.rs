//! Command handlers for the ferry CLI.
//!
//! Each submodule implements one CLI command. Handlers print their results
//! and exit with status 1 on failure; the testable parts they call are
//! plain functions returning `Result`.

mod extract;
mod generate;
mod inline;

pub use extract::{extract_file, extract_report};
pub use generate::run_session;
pub use inline::{inline_snippet, write_inline_source, DEFAULT_INLINE_STEM};

/// Read a file to string, exiting with an error message on failure.
///
/// `-` reads stdin.
pub(crate) fn read_input(path: &str) -> String {
    let result = if path == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    match result {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    }
}
