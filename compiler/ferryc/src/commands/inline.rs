//! The `inline` command: export a code snippet given without a marker.

use std::io;
use std::path::{Path, PathBuf};

use ferry_extract::mark_inline_source;

use super::generate::run_session;
use super::read_input;
use crate::config::SessionConfig;
use crate::output::write_atomic;

/// Stem used for snippets when `--name` is not given.
pub const DEFAULT_INLINE_STEM: &str = "inline";

/// Write `snippet`, marked for export, as `<dir>/<stem>.cpp`.
pub fn write_inline_source(snippet: &str, stem: &str, dir: &Path, marker: &str) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.cpp"));
    write_atomic(&path, mark_inline_source(snippet, marker).as_bytes())?;
    Ok(path)
}

/// Mark the snippet read from `input`, write it next to the outputs and run
/// a session over it.
pub fn inline_snippet(input: &str, stem: Option<&str>, config: SessionConfig) {
    let snippet = read_input(input);
    let stem = stem.unwrap_or(DEFAULT_INLINE_STEM);
    let dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let path = match write_inline_source(&snippet, stem, &dir, &config.extract.marker) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: cannot write snippet source: {e}");
            std::process::exit(1);
        }
    };
    run_session(&path.to_string_lossy(), config);
}
