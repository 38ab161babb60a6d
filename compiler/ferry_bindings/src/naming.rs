//! Identifier choices for the generated module namespace.
//!
//! Every name the rendered module defines at top level must be distinct:
//! public function names, raw binding names, the library identifier, the
//! handle classes, release bindings and the names the runtime prelude
//! imports or defines.

use rustc_hash::FxHashSet;

/// Names bound by the runtime prelude of every rendered module.
pub const PRELUDE_NAMES: &[&str] = &[
    "ctypes",
    "os",
    "POINTER",
    "c_bool",
    "c_char",
    "c_char_p",
    "c_double",
    "c_float",
    "c_int",
    "c_long",
    "c_longlong",
    "c_short",
    "c_size_t",
    "c_void_p",
    "c_wchar",
    "c_wchar_p",
    "_np",
    "_here",
    "_record",
    "_ArrayHandle",
];

/// Python keywords; none can name a function or parameter.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Builtins the runtime prelude calls after import; a module-level
/// definition with one of these names would shadow them.
pub const RUNTIME_BUILTINS: &[&str] = &["classmethod", "isinstance", "len", "list", "open", "str"];

/// Local the proxies bind a returned handle to.
pub const RESULT_LOCAL: &str = "_result";

/// Suffix appended to the library identifier when a function owns the stem.
pub const LIBRARY_SUFFIX: &str = "_lib";

/// Turn a file stem into a host identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a leading digit gets a
/// `_` prefix; an empty stem becomes `_`.
pub fn sanitize_identifier(stem: &str) -> String {
    let mut ident: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Names already claimed in one module namespace.
#[derive(Default)]
pub struct Namespace {
    taken: FxHashSet<String>,
}

impl Namespace {
    /// Module namespace: prelude names, keywords and runtime builtins are
    /// taken.
    pub fn new() -> Self {
        let mut ns = Self::keywords_only();
        for name in PRELUDE_NAMES.iter().chain(RUNTIME_BUILTINS) {
            ns.claim(*name);
        }
        ns
    }

    /// Namespace with only the keywords taken, for function parameters.
    pub fn keywords_only() -> Self {
        let mut ns = Self::default();
        for name in PYTHON_KEYWORDS {
            ns.claim(*name);
        }
        ns
    }

    pub fn claim(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// First of `base + suffix`, `base + suffix + suffix`, ... not yet taken.
    /// The chosen name is claimed.
    pub fn fresh(&mut self, base: &str, suffix: &str) -> String {
        let mut candidate = format!("{base}{suffix}");
        while self.is_taken(&candidate) {
            candidate.push_str(suffix);
        }
        self.claim(candidate.clone());
        candidate
    }

    /// Claim every name of `names`, in order.
    ///
    /// Names that are free keep their spelling; taken or repeated names
    /// are then suffixed as `fresh` does. Free names are claimed first so
    /// a renamed entry never steals the spelling of a later one.
    pub fn claim_distinct(&mut self, names: &[&str], suffix: &str) -> Vec<String> {
        let kept: Vec<bool> = names
            .iter()
            .map(|name| {
                let free = !self.is_taken(name);
                if free {
                    self.claim(*name);
                }
                free
            })
            .collect();
        names
            .iter()
            .zip(kept)
            .map(|(name, free)| {
                if free {
                    (*name).to_string()
                } else {
                    self.fresh(name, suffix)
                }
            })
            .collect()
    }

    /// `base` itself if free, otherwise as `fresh`.
    pub fn prefer(&mut self, base: &str, suffix: &str) -> String {
        if self.is_taken(base) {
            self.fresh(base, suffix)
        } else {
            self.claim(base);
            base.to_string()
        }
    }
}
