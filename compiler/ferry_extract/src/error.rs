//! Malformed-signature errors.

/// Error raised when a marked signature cannot be reconstructed.
///
/// Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The marker is the last meaningful line of the file.
    #[error("export marker on line {marker_line} is not followed by a function signature")]
    MissingSignature { marker_line: usize },

    /// The line after the marker has no `(`.
    #[error("exported signature on line {line} has no parameter list: `{text}`")]
    MissingParameterList { line: usize, text: String },

    /// The parameter list never reaches `)` before end of file.
    #[error("parameter list of exported function `{function}` (line {line}) is not closed before end of file")]
    UnterminatedParameters { function: String, line: usize },
}

impl ExtractError {
    /// Line the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::MissingSignature { marker_line } => *marker_line,
            Self::MissingParameterList { line, .. } | Self::UnterminatedParameters { line, .. } => {
                *line
            }
        }
    }

    /// Name of the offending function, when one was recovered.
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::UnterminatedParameters { function, .. } => Some(function),
            Self::MissingSignature { .. } | Self::MissingParameterList { .. } => None,
        }
    }
}
