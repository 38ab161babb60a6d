//! Exported function records.

use std::fmt;

use smallvec::SmallVec;

use crate::token::TypeToken;

/// Default value of a parameter, as it should appear in the host signature.
///
/// The literal is carried opaquely. The one exception is a boolean literal,
/// which is re-spelled to the host's capitalized `True`/`False`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefaultLiteral {
    native: String,
    host: String,
}

impl DefaultLiteral {
    /// Build from the right-hand side of `name = literal` in native source.
    pub fn from_native(text: &str) -> Self {
        let native = text.trim().to_string();
        let host = match native.as_str() {
            "true" => "True".to_string(),
            "false" => "False".to_string(),
            other => other.to_string(),
        };
        DefaultLiteral { native, host }
    }

    /// The literal as written in the native source.
    #[inline]
    pub fn native(&self) -> &str {
        &self.native
    }

    /// The literal as spelled in host code.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }
}

/// One parameter of an exported function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub ty: TypeToken,
    pub name: String,
    pub default: Option<DefaultLiteral>,
}

impl Parameter {
    pub fn new(ty: TypeToken, name: impl Into<String>) -> Self {
        Parameter {
            ty,
            name: name.into(),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: DefaultLiteral) -> Self {
        self.default = Some(default);
        self
    }
}

/// A native function marked for export, with its array positions resolved.
///
/// Array indices are 1-based parameter positions. They are derived from the
/// parameter tokens on construction, so they always agree with `params`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExportedFunction {
    name: String,
    return_type: TypeToken,
    params: Vec<Parameter>,
    param_array_indices: SmallVec<[usize; 4]>,
    param_handle_indices: SmallVec<[usize; 4]>,
    return_is_array: bool,
    return_is_handle: bool,
}

impl ExportedFunction {
    pub fn new(name: impl Into<String>, return_type: TypeToken, params: Vec<Parameter>) -> Self {
        let mut param_array_indices = SmallVec::new();
        let mut param_handle_indices = SmallVec::new();
        for (i, param) in params.iter().enumerate() {
            if param.ty.is_dynamic_array() {
                param_array_indices.push(i + 1);
            } else if param.ty.handle_element().is_some() {
                param_handle_indices.push(i + 1);
            }
        }
        let return_is_array = return_type.is_dynamic_array();
        let return_is_handle = return_type.handle_element().is_some();

        ExportedFunction {
            name: name.into(),
            return_type,
            params,
            param_array_indices,
            param_handle_indices,
            return_is_array,
            return_is_handle,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn return_type(&self) -> &TypeToken {
        &self.return_type
    }

    #[inline]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// 1-based positions of native dynamic-array parameters.
    #[inline]
    pub fn param_array_indices(&self) -> &[usize] {
        &self.param_array_indices
    }

    /// 1-based positions of parameters already written as `array_handle<T>`.
    #[inline]
    pub fn param_handle_indices(&self) -> &[usize] {
        &self.param_handle_indices
    }

    #[inline]
    pub fn return_is_array(&self) -> bool {
        self.return_is_array
    }

    #[inline]
    pub fn return_is_handle(&self) -> bool {
        self.return_is_handle
    }

    pub fn is_array_param(&self, index: usize) -> bool {
        self.param_array_indices.contains(&index)
    }

    pub fn is_handle_param(&self, index: usize) -> bool {
        self.param_handle_indices.contains(&index)
    }

    /// Whether any position crosses the boundary as an array handle.
    ///
    /// Such functions get the two-tier host binding (raw + proxy).
    pub fn uses_arrays(&self) -> bool {
        !self.param_array_indices.is_empty()
            || !self.param_handle_indices.is_empty()
            || self.return_is_array
            || self.return_is_handle
    }

    /// Exported boundary symbol (`_` + name).
    pub fn symbol(&self) -> String {
        format!("_{}", self.name)
    }
}

impl fmt::Display for ExportedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", param.ty, param.name)?;
            if let Some(default) = &param.default {
                write!(f, " = {}", default.native())?;
            }
        }
        write!(f, ") -> {}", self.return_type)
    }
}

#[cfg(test)]
mod tests;
