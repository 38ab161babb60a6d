//! Build collaborator: boundary source in, shared library out.
//!
//! The `Toolchain` trait is the seam between the session and the external
//! compiler. `SystemCompiler` drives a GCC-compatible command line in two
//! steps (compile to an object in a scratch directory, then link a shared
//! library) and reports success together with the captured diagnostics.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use regex::Regex;

use crate::config::ToolchainConfig;
use crate::error::BuildError;

/// One compile request.
#[derive(Clone, Copy, Debug)]
pub struct BuildRequest<'a> {
    /// Generated boundary source.
    pub source: &'a Path,
    /// Shared library to produce.
    pub artifact: &'a Path,
}

/// Result of a compile request that could be run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub success: bool,
    /// Everything the compiler wrote to stdout and stderr.
    pub diagnostics: String,
}

/// Builds boundary sources into shared libraries.
pub trait Toolchain {
    fn build(&self, request: &BuildRequest<'_>) -> Result<BuildReport, BuildError>;
}

/// Whether compiler output reports an error.
///
/// Matches `error:` and `fatal error:` case-insensitively; warnings and
/// notes do not count.
///
/// # Panics
///
/// Never in practice: the pattern is a constant.
#[allow(clippy::expect_used)]
pub fn diagnostics_report_error(diagnostics: &str) -> bool {
    static ERROR_MARKER: OnceLock<Regex> = OnceLock::new();
    ERROR_MARKER
        .get_or_init(|| {
            Regex::new(r"(?i)\b(?:fatal error|error):").expect("error marker pattern is valid")
        })
        .is_match(diagnostics)
}

/// GCC-compatible compiler found on `PATH` or by explicit path.
pub struct SystemCompiler {
    config: ToolchainConfig,
}

impl SystemCompiler {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Arguments of the compile step.
    pub fn compile_args(&self, source: &Path, object: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-c".into(),
            format!("-std={}", self.config.std).into(),
        ];
        if self.config.platform != ferry_ir::Platform::Windows {
            args.push("-fPIC".into());
        }
        args.extend(self.config.extra_flags.iter().map(OsString::from));
        args.push(source.into());
        args.push("-o".into());
        args.push(object.into());
        args
    }

    /// Arguments of the link step.
    pub fn link_args(&self, object: &Path, artifact: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-shared".into()];
        if self.config.platform == ferry_ir::Platform::MacOs {
            args.push("-undefined".into());
            args.push("dynamic_lookup".into());
        }
        args.push(object.into());
        args.push("-o".into());
        args.push(artifact.into());
        args.extend(self.config.extra_flags.iter().map(OsString::from));
        args
    }

    fn command(&self) -> Result<Command, BuildError> {
        let mut cmd = Command::new(&self.config.compiler);
        if let Some(dir) = &self.config.search_dir {
            let inherited = std::env::var_os("PATH").unwrap_or_default();
            let paths = std::iter::once(dir.clone()).chain(std::env::split_paths(&inherited));
            let joined = std::env::join_paths(paths).map_err(|e| BuildError::SearchPath {
                dir: dir.clone(),
                message: e.to_string(),
            })?;
            cmd.env("PATH", joined);
        }
        Ok(cmd)
    }

    fn run(&self, args: Vec<OsString>) -> Result<Output, BuildError> {
        let mut cmd = self.command()?;
        cmd.args(args);
        tracing::debug!(command = ?cmd, "running compiler");

        let compiler = self.config.compiler.to_string_lossy().into_owned();
        cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BuildError::CompilerNotFound {
                    compiler,
                    message: e.to_string(),
                }
            } else {
                BuildError::Io {
                    compiler,
                    source: e,
                }
            }
        })
    }
}

impl Toolchain for SystemCompiler {
    #[tracing::instrument(level = "info", skip_all, fields(artifact = %request.artifact.display()))]
    fn build(&self, request: &BuildRequest<'_>) -> Result<BuildReport, BuildError> {
        let scratch = tempfile::tempdir().map_err(|e| BuildError::Io {
            compiler: self.config.compiler.to_string_lossy().into_owned(),
            source: e,
        })?;
        let object: PathBuf = scratch.path().join("boundary.o");

        let compiled = self.run(self.compile_args(request.source, &object))?;
        let mut diagnostics = collect_output(&compiled);
        if !compiled.status.success() || diagnostics_report_error(&diagnostics) {
            return Ok(BuildReport {
                success: false,
                diagnostics,
            });
        }

        let linked = self.run(self.link_args(&object, request.artifact))?;
        diagnostics.push_str(&collect_output(&linked));
        let success = linked.status.success() && !diagnostics_report_error(&diagnostics);

        Ok(BuildReport {
            success,
            diagnostics,
        })
    }
}

fn collect_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}
