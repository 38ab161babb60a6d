//! One pipeline run over one native source file.
//!
//! ```text
//! release stale artifact (if an unloader is attached)
//!        ↓
//! read source → extract → boundary source (<stem>_ext.cpp)
//!        ↓
//! assemble bindings → build artifact (unless disabled)
//!        ↓
//! write binding module (<library>.py)
//! ```
//!
//! The binding module is written last and only when the artifact built, so
//! a module on disk never refers to a failed build.

use std::path::{Path, PathBuf};

use ferry_bindings::{assemble, render_python, BindingModule};
use ferry_codegen::{emit_boundary_source, BoundaryUnit};
use ferry_extract::extract;
use ferry_ir::ExportedFunction;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::output::{remove_if_present, write_atomic};
use crate::paths::SourcePaths;
use crate::toolchain::{BuildRequest, SystemCompiler, Toolchain};
use crate::unload::{release_stale_artifact, ArtifactUnloader, UnloadOutcome};

/// What a successful run produced.
#[derive(Debug)]
pub struct SessionReport {
    pub paths: SourcePaths,
    pub functions: Vec<ExportedFunction>,
    /// Symbols exported by the boundary source.
    pub symbols: Vec<String>,
    pub bindings: BindingModule,
    /// Path of the written binding module.
    pub binding_module: PathBuf,
    /// `Some` when the artifact was built in this run.
    pub artifact: Option<PathBuf>,
    /// Compiler output of a successful build (warnings).
    pub diagnostics: String,
    /// `Some` when an unloader is attached.
    pub unload: Option<UnloadOutcome>,
}

/// Driver for generation and build.
pub struct Session {
    config: SessionConfig,
    toolchain: Box<dyn Toolchain>,
    unloader: Option<Box<dyn ArtifactUnloader>>,
}

impl Session {
    /// Session building with the system compiler described by `config`.
    pub fn new(config: SessionConfig) -> Self {
        let toolchain = Box::new(SystemCompiler::new(config.toolchain.clone()));
        Self {
            config,
            toolchain,
            unloader: None,
        }
    }

    #[must_use]
    pub fn with_toolchain(mut self, toolchain: impl Toolchain + 'static) -> Self {
        self.toolchain = Box::new(toolchain);
        self
    }

    #[must_use]
    pub fn with_unloader(mut self, unloader: impl ArtifactUnloader + 'static) -> Self {
        self.unloader = Some(Box::new(unloader));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run the pipeline for `source`.
    #[tracing::instrument(level = "info", skip_all, fields(source = %source.display()))]
    pub fn run(&self, source: &Path) -> Result<SessionReport, SessionError> {
        let paths = SourcePaths::for_source(
            source,
            self.config.output_dir.as_deref(),
            self.config.toolchain.platform,
        )?;

        let unload = self
            .unloader
            .as_deref()
            .map(|unloader| release_stale_artifact(&paths.handle_record, unloader));

        let text = std::fs::read_to_string(source).map_err(|e| SessionError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        let functions = extract(&text, &self.config.extract).map_err(|e| SessionError::Extract {
            path: source.to_path_buf(),
            source: e,
        })?;
        tracing::info!(count = functions.len(), "exported functions found");

        if let Some(dir) = &self.config.output_dir {
            std::fs::create_dir_all(dir).map_err(|e| SessionError::Write {
                path: dir.clone(),
                source: e,
            })?;
        }

        let boundary = emit_boundary_source(&BoundaryUnit {
            source_name: &paths.include,
            platform: self.config.toolchain.platform,
            functions: &functions,
        });
        write_file(&paths.boundary_source, boundary.code.as_bytes())?;

        let bindings = assemble(&paths.stem, &paths.artifact_name(), &functions);
        let binding_module = paths.output_dir.join(bindings.file_name());

        let mut diagnostics = String::new();
        let artifact = if self.config.build {
            let report = self
                .toolchain
                .build(&BuildRequest {
                    source: &paths.boundary_source,
                    artifact: &paths.artifact,
                })
                .inspect_err(|_| discard_binding_module(&binding_module))?;
            if !report.success {
                discard_binding_module(&binding_module);
                return Err(SessionError::BuildFailed {
                    artifact: paths.artifact.clone(),
                    diagnostics: report.diagnostics,
                });
            }
            diagnostics = report.diagnostics;
            Some(paths.artifact.clone())
        } else {
            None
        };

        write_file(&binding_module, render_python(&bindings).as_bytes())?;

        Ok(SessionReport {
            paths,
            functions,
            symbols: boundary.symbols,
            bindings,
            binding_module,
            artifact,
            diagnostics,
            unload,
        })
    }
}

/// A module left over from an earlier run would load a stale or missing
/// artifact once this build failed.
fn discard_binding_module(path: &Path) {
    match remove_if_present(path) {
        Ok(true) => tracing::debug!(module = %path.display(), "removed stale binding module"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, module = %path.display(), "could not remove stale binding module"),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), SessionError> {
    write_atomic(path, contents).map_err(|e| SessionError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote");
    Ok(())
}
