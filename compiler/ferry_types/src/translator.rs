//! Token vocabulary and the two translation directions.

use std::borrow::Cow;
use std::fmt;

use ferry_ir::{ElementKind, TypeToken, HANDLE_TEMPLATE};

/// Type of a value at the `extern "C"` boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryType {
    /// Scalar or pointer, spelled as in C++.
    Scalar(&'static str),
    /// `array_handle<T>` for the given element kind.
    Handle(ElementKind),
    Void,
    /// Untranslated token, emitted as written.
    Verbatim(String),
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(spelling) => f.write_str(spelling),
            Self::Handle(kind) => write!(f, "{HANDLE_TEMPLATE}<{}>", kind.boundary_c_type()),
            Self::Void => f.write_str("void"),
            Self::Verbatim(text) => f.write_str(text),
        }
    }
}

/// Host-side descriptor of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    /// ctypes scalar such as `c_int` or `c_char_p`.
    Scalar(&'static str),
    /// `POINTER(<ctype>)`.
    Pointer(&'static str),
    /// Host array (sequence or numpy array) of the element kind.
    Array(ElementKind),
    /// ctypes structure mirroring `array_handle<T>`.
    Handle(ElementKind),
    /// No value (`None` restype).
    Void,
    /// Untranslated token, emitted as written.
    Verbatim(String),
}

impl HostType {
    /// Descriptor as seen by a raw ctypes binding.
    pub fn raw(&self) -> HostType {
        match self {
            Self::Array(kind) => Self::Handle(*kind),
            other => other.clone(),
        }
    }

    /// Element kind if this is an array or a handle.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            Self::Array(kind) | Self::Handle(kind) => Some(*kind),
            _ => None,
        }
    }

    /// ctypes spelling of the raw descriptor.
    ///
    /// ctypes cannot describe a host array, only the handle record that
    /// carries it, so arrays spell as their handle class.
    pub fn ctype(&self) -> Cow<'static, str> {
        match self {
            Self::Scalar(name) => Cow::Borrowed(*name),
            Self::Pointer(name) => Cow::Owned(format!("POINTER({name})")),
            Self::Array(kind) | Self::Handle(kind) => Cow::Owned(Self::handle_class(*kind)),
            Self::Void => Cow::Borrowed("None"),
            Self::Verbatim(text) => Cow::Owned(text.clone()),
        }
    }

    /// Name of the ctypes structure class for a handle of `kind`.
    pub fn handle_class(kind: ElementKind) -> String {
        kind.handle_class()
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ctype())
    }
}

/// Translation between native tokens and boundary/host types.
pub struct TypeTranslator;

impl TypeTranslator {
    /// Boundary C++ type for a native token.
    pub fn to_boundary(token: &TypeToken) -> BoundaryType {
        if let Some(kind) = Self::array_kind(token) {
            return BoundaryType::Handle(kind);
        }
        match scalar_entry(token.as_str()) {
            Some((_, HostType::Void)) => BoundaryType::Void,
            Some((spelling, _)) => BoundaryType::Scalar(spelling),
            None => {
                tracing::debug!(token = %token, "untranslated boundary type, passing through");
                BoundaryType::Verbatim(token.native_spelling())
            }
        }
    }

    /// Host descriptor for a native token.
    pub fn to_host(token: &TypeToken) -> HostType {
        if let Some(kind) = Self::array_kind(token) {
            return HostType::Array(kind);
        }
        match scalar_entry(token.as_str()) {
            Some((_, host)) => host,
            None => {
                tracing::debug!(token = %token, "untranslated host type, passing through");
                HostType::Verbatim(token.as_str().to_string())
            }
        }
    }

    /// Whether the token is part of the documented vocabulary.
    pub fn is_known(token: &TypeToken) -> bool {
        Self::array_kind(token).is_some() || scalar_entry(token.as_str()).is_some()
    }

    fn array_kind(token: &TypeToken) -> Option<ElementKind> {
        token
            .array_element()
            .map(ferry_ir::NativeElement::kind)
            .or_else(|| token.handle_element())
    }
}

/// Scalar and pointer vocabulary: token → (C++ spelling, host descriptor).
fn scalar_entry(token: &str) -> Option<(&'static str, HostType)> {
    use HostType::{Pointer, Scalar, Void};

    let entry = match token {
        "bool" | "_Bool" => ("bool", Scalar("c_bool")),
        "bool*" => ("bool*", Pointer("c_bool")),
        "char" => ("char", Scalar("c_char")),
        "char*" => ("char*", Scalar("c_char_p")),
        "double" => ("double", Scalar("c_double")),
        "double*" => ("double*", Pointer("c_double")),
        "float" => ("float", Scalar("c_float")),
        "float*" => ("float*", Pointer("c_float")),
        "int" => ("int", Scalar("c_int")),
        "int*" => ("int*", Pointer("c_int")),
        "short" => ("short", Scalar("c_short")),
        "short*" => ("short*", Pointer("c_short")),
        "long" => ("long", Scalar("c_long")),
        "long*" => ("long*", Pointer("c_long")),
        "longlong" => ("long long", Scalar("c_longlong")),
        "longlong*" => ("long long*", Pointer("c_longlong")),
        "size_t" => ("size_t", Scalar("c_size_t")),
        "void" => ("void", Void),
        "void*" => ("void*", Scalar("c_void_p")),
        "wchar_t" => ("wchar_t", Scalar("c_wchar")),
        "wchar_t*" => ("wchar_t*", Scalar("c_wchar_p")),
        _ => return None,
    };
    Some(entry)
}
