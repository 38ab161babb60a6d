//! Names and locations of everything generated for one source file.

use std::path::{Path, PathBuf};

use ferry_ir::Platform;

use crate::error::SessionError;
use crate::handle_record::HandleRecord;

/// Suffix of the boundary source and artifact stems.
pub const BOUNDARY_SUFFIX: &str = "_ext";

/// Generated file locations for one native source.
///
/// The binding module is missing here on purpose: its name depends on the
/// exported function names and is known only after assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePaths {
    pub source: PathBuf,
    pub stem: String,
    /// Directory receiving every generated file.
    pub output_dir: PathBuf,
    /// `<stem>_ext.cpp`.
    pub boundary_source: PathBuf,
    /// `<stem>_ext.<so|dylib|dll>`.
    pub artifact: PathBuf,
    /// `<stem>_handle.txt`.
    pub handle_record: PathBuf,
    /// How the boundary source names the native source in `#include`.
    pub include: String,
}

impl SourcePaths {
    pub fn for_source(
        source: &Path,
        output_dir: Option<&Path>,
        platform: Platform,
    ) -> Result<Self, SessionError> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SessionError::InvalidSourcePath {
                path: source.to_path_buf(),
            })?
            .to_string();
        let file_name = source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&stem)
            .to_string();

        let source_dir = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (output_dir, include) = match output_dir {
            Some(dir) if dir != source_dir => {
                let absolute = std::fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
                (dir.to_path_buf(), include_spelling(&absolute))
            }
            _ => (source_dir, file_name),
        };

        let boundary_stem = format!("{stem}{BOUNDARY_SUFFIX}");
        Ok(Self {
            source: source.to_path_buf(),
            boundary_source: output_dir.join(format!("{boundary_stem}.cpp")),
            artifact: output_dir.join(format!("{boundary_stem}.{}", platform.library_extension())),
            handle_record: HandleRecord::path_for(&output_dir, &stem),
            output_dir,
            stem,
            include,
        })
    }

    /// Artifact file name, as the binding module refers to it.
    pub fn artifact_name(&self) -> String {
        self.artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Forward slashes work in `#include` on every supported compiler.
fn include_spelling(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
