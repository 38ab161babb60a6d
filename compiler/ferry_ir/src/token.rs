//! Native type tokens.
//!
//! A `TypeToken` is the normalized spelling of one native parameter or
//! return type. Normalization removes qualifiers the boundary does not care
//! about and folds the two-word `long long` into the single word `longlong`,
//! so every token can be looked up as one key.

use std::borrow::Cow;
use std::fmt;

/// Name of the fixed-layout array record template in the emitted C++.
pub const HANDLE_TEMPLATE: &str = "array_handle";

/// Two-word integer keyword and its canonical single-word form.
const COMPOUND_LONG: &str = "long long";
const CANONICAL_LONG: &str = "longlong";

/// Normalized native type spelling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeToken(String);

impl TypeToken {
    /// Normalize a raw native type spelling.
    ///
    /// Drops `const` words and a trailing reference `&`, folds `long long`,
    /// and removes whitespace around punctuation so `int *` and
    /// `std::vector< double >` become `int*` and `std::vector<double>`.
    pub fn new(raw: &str) -> Self {
        let canonical = Self::canonicalize_line(raw);
        let words: Vec<&str> = canonical
            .split_whitespace()
            .filter(|word| *word != "const")
            .collect();
        let joined = words.join(" ");

        let chars: Vec<char> = joined.chars().collect();
        let mut out = String::with_capacity(joined.len());
        for (i, &c) in chars.iter().enumerate() {
            if c == ' ' {
                let prev = out.chars().last();
                let next = chars.get(i + 1).copied();
                if prev.is_some_and(is_glue) || next.is_some_and(is_glue) {
                    continue;
                }
            }
            out.push(c);
        }

        let out = out.trim_end_matches('&').to_string();
        TypeToken(out)
    }

    /// Fold every `long long` in a line of source into `longlong`.
    ///
    /// Applied to whole lines before any whitespace splitting so the
    /// compound keyword is never mistaken for a type followed by a name.
    pub fn canonicalize_line(line: &str) -> Cow<'_, str> {
        if line.contains(COMPOUND_LONG) {
            Cow::Owned(line.replace(COMPOUND_LONG, CANONICAL_LONG))
        } else {
            Cow::Borrowed(line)
        }
    }

    /// The normalized spelling.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Spelling usable in emitted C++ (`longlong` unfolded again).
    pub fn native_spelling(&self) -> String {
        self.0.replace(CANONICAL_LONG, COMPOUND_LONG)
    }

    /// Element of a native dynamic array (`std::vector<T>` / `vector<T>`).
    pub fn array_element(&self) -> Option<NativeElement> {
        let inner = template_argument(&self.0, "std::vector")
            .or_else(|| template_argument(&self.0, "vector"))?;
        NativeElement::from_token(inner)
    }

    /// Element of an already boundary-shaped `array_handle<T>`.
    ///
    /// Only the four boundary element kinds qualify; any other element type
    /// has no host descriptor and is left to pass through untranslated.
    pub fn handle_element(&self) -> Option<ElementKind> {
        let inner = template_argument(&self.0, HANDLE_TEMPLATE)?;
        ElementKind::from_boundary_token(inner)
    }

    /// Whether this token is a native dynamic array.
    #[inline]
    pub fn is_dynamic_array(&self) -> bool {
        self.array_element().is_some()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_glue(c: char) -> bool {
    matches!(c, '*' | '&' | '<' | '>' | ',' | ':')
}

/// `template_argument("std::vector<int>", "std::vector")` is `Some("int")`.
fn template_argument<'a>(token: &'a str, template: &str) -> Option<&'a str> {
    token
        .strip_prefix(template)?
        .strip_prefix('<')?
        .strip_suffix('>')
}

/// Element kind of an array handle as it crosses the boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Int32,
    Int64,
    Float64,
    Bool,
}

impl ElementKind {
    /// Every element kind, in emission order.
    pub const fn all() -> [ElementKind; 4] {
        [Self::Int32, Self::Int64, Self::Float64, Self::Bool]
    }

    /// C++ element type inside `array_handle<T>`.
    pub const fn boundary_c_type(self) -> &'static str {
        match self {
            Self::Int32 => "int",
            Self::Int64 => "long long",
            Self::Float64 => "double",
            Self::Bool => "bool",
        }
    }

    /// Short lowercase name (`int32`, `int64`, `float64`, `bool`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
        }
    }

    /// ctypes scalar class of one element.
    pub const fn host_ctype(self) -> &'static str {
        match self {
            Self::Int32 => "c_int",
            Self::Int64 => "c_longlong",
            Self::Float64 => "c_double",
            Self::Bool => "c_bool",
        }
    }

    /// numpy dtype matching `host_ctype`.
    pub const fn dtype(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool_",
        }
    }

    /// Host structure class mirroring `array_handle<T>` for this kind.
    pub fn handle_class(self) -> String {
        format!("handle_{}", self.name())
    }

    /// Boundary symbol that frees a handle buffer allocated by the wrapper.
    pub fn release_symbol(self) -> String {
        format!("_ferry_release_{}", self.name())
    }

    fn from_boundary_token(token: &str) -> Option<Self> {
        match token {
            "int" => Some(Self::Int32),
            "longlong" => Some(Self::Int64),
            "double" => Some(Self::Float64),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element type of a native dynamic array.
///
/// Several native element types share one boundary element kind; the
/// emitted conversion helpers widen or narrow element by element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeElement {
    Double,
    Float,
    Int,
    Long,
    Short,
    LongLong,
    Bool,
}

impl NativeElement {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "short" => Some(Self::Short),
            "longlong" => Some(Self::LongLong),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }

    /// Boundary element kind this native element travels as.
    pub const fn kind(self) -> ElementKind {
        match self {
            Self::Double | Self::Float => ElementKind::Float64,
            Self::Int | Self::Long | Self::Short => ElementKind::Int32,
            Self::LongLong => ElementKind::Int64,
            Self::Bool => ElementKind::Bool,
        }
    }

    /// C++ spelling of the native element type.
    pub const fn c_spelling(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::LongLong => "long long",
            Self::Bool => "bool",
        }
    }
}
