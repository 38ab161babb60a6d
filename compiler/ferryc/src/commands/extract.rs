//! The `extract` command: list the exported functions of a source file.

use ferry_extract::{extract, ExtractError, ExtractOptions};
use ferry_ir::ExportedFunction;

use super::read_input;

/// One report line per exported function.
///
/// ```text
/// sum(std::vector<double> xs) -> double  [symbol _sum, array params 1]
/// ```
pub fn extract_report(source: &str, options: &ExtractOptions) -> Result<Vec<String>, ExtractError> {
    let functions = extract(source, options)?;
    Ok(functions.iter().map(describe).collect())
}

fn describe(function: &ExportedFunction) -> String {
    let mut notes = vec![format!("symbol {}", function.symbol())];
    if !function.param_array_indices().is_empty() {
        notes.push(format!("array params {}", join(function.param_array_indices())));
    }
    if !function.param_handle_indices().is_empty() {
        notes.push(format!("handle params {}", join(function.param_handle_indices())));
    }
    if function.return_is_array() {
        notes.push("array return".to_string());
    } else if function.return_is_handle() {
        notes.push("handle return".to_string());
    }
    format!("{function}  [{}]", notes.join(", "))
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Print the extraction report for `path`.
pub fn extract_file(path: &str, options: &ExtractOptions) {
    let content = read_input(path);
    match extract_report(&content, options) {
        Ok(lines) if lines.is_empty() => {
            println!("no functions marked with '{}' in {path}", options.marker);
        }
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("error: {path}: {e}");
            std::process::exit(1);
        }
    }
}
