//! Marking inline snippets.

/// Prefix the first code line of `code` with an export marker comment.
///
/// Used for snippets passed directly instead of as a file: the snippet holds
/// one function and the caller expects it exported. Leading blank lines,
/// preprocessor directives and comments are left above the marker. A snippet
/// that already carries `marker` is returned unchanged.
pub fn mark_inline_source(code: &str, marker: &str) -> String {
    if code.contains(marker) {
        return ensure_trailing_newline(code.to_string());
    }

    let mut out = String::with_capacity(code.len() + marker.len() + 3);
    let mut marked = false;
    for line in code.lines() {
        if !marked && is_code_line(line) {
            out.push_str("//");
            out.push_str(marker);
            out.push('\n');
            marked = true;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn is_code_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    !(trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*'))
}

fn ensure_trailing_newline(mut code: String) -> String {
    if !code.ends_with('\n') {
        code.push('\n');
    }
    code
}
