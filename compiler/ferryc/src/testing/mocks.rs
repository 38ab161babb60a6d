//! Mock collaborators for driving a `Session` without a compiler or a
//! host process.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::BuildError;
use crate::toolchain::{diagnostics_report_error, BuildReport, BuildRequest, Toolchain};
use crate::unload::ArtifactUnloader;

/// Toolchain that "compiles" by writing a placeholder artifact.
///
/// The build fails when the canned diagnostics contain an error marker,
/// the same way compiler output is judged.
pub struct MockToolchain {
    diagnostics: String,
    builds: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockToolchain {
    pub fn with_diagnostics(diagnostics: impl Into<String>) -> Self {
        Self {
            diagnostics: diagnostics.into(),
            builds: Rc::default(),
        }
    }

    /// Boundary sources passed to `build`, shared with the mock.
    pub fn builds(&self) -> Rc<RefCell<Vec<PathBuf>>> {
        Rc::clone(&self.builds)
    }
}

impl Toolchain for MockToolchain {
    fn build(&self, request: &BuildRequest<'_>) -> Result<BuildReport, BuildError> {
        self.builds.borrow_mut().push(request.source.to_path_buf());
        let success = !diagnostics_report_error(&self.diagnostics);
        if success {
            std::fs::write(request.artifact, b"mock artifact").map_err(|e| BuildError::Io {
                compiler: "mock".into(),
                source: e,
            })?;
        }
        Ok(BuildReport {
            success,
            diagnostics: self.diagnostics.clone(),
        })
    }
}

/// Unloader returning a canned result and remembering the handles it saw.
pub struct MockUnloader {
    result: Result<(), String>,
    handles: Rc<RefCell<Vec<u64>>>,
}

impl MockUnloader {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(()),
            handles: Rc::default(),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(reason.into()),
            handles: Rc::default(),
        }
    }

    pub fn handles(&self) -> Rc<RefCell<Vec<u64>>> {
        Rc::clone(&self.handles)
    }
}

impl ArtifactUnloader for MockUnloader {
    fn unload(&self, handle: u64) -> Result<(), String> {
        self.handles.borrow_mut().push(handle);
        self.result.clone()
    }
}
