//! Driver errors.

use std::io;
use std::path::PathBuf;

use ferry_extract::ExtractError;
use ferry_ir::UnknownPlatform;

/// Failure of one session run.
///
/// Extraction failures and build failures are separate variants: the first
/// means nothing was generated, the second means generation succeeded but
/// the artifact is unusable.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` has no file stem to name the generated files after", path.display())]
    InvalidSourcePath { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("build of `{}` failed:\n{diagnostics}", artifact.display())]
    BuildFailed { artifact: PathBuf, diagnostics: String },

    #[error(transparent)]
    Toolchain(#[from] BuildError),
}

impl SessionError {
    /// Whether generation succeeded and only the build failed.
    pub fn is_build_failure(&self) -> bool {
        matches!(self, Self::BuildFailed { .. } | Self::Toolchain(_))
    }
}

/// The compiler could not be run at all.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("compiler `{compiler}` not found: {message}")]
    CompilerNotFound { compiler: String, message: String },

    #[error("failed to run compiler `{compiler}`: {source}")]
    Io {
        compiler: String,
        #[source]
        source: io::Error,
    },

    #[error("toolchain directory `{}` cannot be added to PATH: {message}", dir.display())]
    SearchPath { dir: PathBuf, message: String },
}

/// Invalid command-line option.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option `{option}`")]
    Unknown { option: String },

    #[error("option `{option}` needs a value")]
    MissingValue { option: String },

    #[error(transparent)]
    Platform(#[from] UnknownPlatform),
}
