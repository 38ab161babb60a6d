//! Parameter text handling.

use ferry_ir::{DefaultLiteral, Parameter, TypeToken};

/// Storage-class words that carry no type information for the boundary.
const IGNORED_SPECIFIERS: [&str; 3] = ["inline", "static", "constexpr"];

/// Cut a trailing `//` comment.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(at) => &line[..at],
        None => line,
    }
}

/// Add the parameter segments found in `text` to `segments`.
///
/// `text` is the part of a line inside the parameter list. Returns `true`
/// when the list closes on this line.
pub(crate) fn absorb(text: &str, segments: &mut Vec<String>) -> bool {
    let (inside, closed) = match text.find(')') {
        Some(close) => (&text[..close], true),
        None => (text, false),
    };
    let inside = inside.replace('{', "");
    segments.extend(
        inside
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    );
    closed
}

/// Split a declarator into a type and a name, moving pointer and reference
/// marks that were written against the name onto the type.
///
/// Returns `None` when the text holds no words at all.
pub(crate) fn split_declarator(text: &str) -> Option<(String, Option<String>)> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| !IGNORED_SPECIFIERS.contains(word))
        .collect();
    let (last, rest) = words.split_last()?;
    if rest.is_empty() {
        return Some(((*last).to_string(), None));
    }

    let mut ty = rest.join(" ");
    let name = last.trim_start_matches(&['*', '&'][..]);
    ty.push_str(&last[..last.len() - name.len()]);
    if name.is_empty() {
        return Some((ty, None));
    }
    Some((ty, Some(name.to_string())))
}

/// Build the parameter at 1-based `position` from one list segment.
///
/// A segment without a name gets `argN`. `name = literal` keeps the literal
/// as the default value.
pub(crate) fn parse_parameter(segment: &str, position: usize) -> Option<Parameter> {
    let (declarator, default) = match segment.split_once('=') {
        Some((left, right)) => (left, Some(right)),
        None => (segment, None),
    };
    let (ty, name) = split_declarator(declarator)?;
    let name = name.unwrap_or_else(|| format!("arg{position}"));

    let param = Parameter::new(TypeToken::new(&ty), name);
    Some(match default {
        Some(literal) => param.with_default(DefaultLiteral::from_native(literal)),
        None => param,
    })
}

/// Turn collected segments into parameters. A lone `void` means none.
pub(crate) fn parse_parameters(segments: &[String]) -> Vec<Parameter> {
    if let [only] = segments {
        if only == "void" {
            return Vec::new();
        }
    }
    segments
        .iter()
        .enumerate()
        .filter_map(|(i, segment)| parse_parameter(segment, i + 1))
        .collect()
}
