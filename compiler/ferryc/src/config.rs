//! Session and toolchain configuration.
//!
//! Everything the driver needs from its environment is collected here into
//! plain values and passed down explicitly. The build collaborator never
//! reads or patches the process environment itself.

use std::path::PathBuf;

use ferry_extract::ExtractOptions;
use ferry_ir::Platform;

use crate::error::OptionError;

/// Compiler used when neither `--cxx` nor `FERRY_CXX` is given.
pub const DEFAULT_CXX: &str = "g++";

/// Environment variable overriding the default compiler.
pub const CXX_ENV: &str = "FERRY_CXX";

/// Language standard passed to the compiler by default.
pub const DEFAULT_STD: &str = "c++17";

/// How the boundary source is compiled into a shared library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Compiler executable (name looked up on `PATH`, or a path).
    pub compiler: PathBuf,
    /// Directory prepended to the compiler's `PATH`, for toolchains whose
    /// driver finds its helpers there (MinGW, Rtools).
    pub search_dir: Option<PathBuf>,
    /// `-std=` value.
    pub std: String,
    /// Extra arguments appended to both compile and link steps.
    pub extra_flags: Vec<String>,
    /// Platform the artifact is built for.
    pub platform: Platform,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from(DEFAULT_CXX),
            search_dir: None,
            std: DEFAULT_STD.to_string(),
            extra_flags: Vec::new(),
            platform: Platform::host(),
        }
    }
}

impl ToolchainConfig {
    /// Defaults with `FERRY_CXX` applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(cxx) = std::env::var_os(CXX_ENV).filter(|v| !v.is_empty()) {
            config.compiler = PathBuf::from(cxx);
        }
        config
    }
}

/// One driver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Directory for generated files; the source's directory when `None`.
    pub output_dir: Option<PathBuf>,
    /// Whether to compile the boundary source.
    pub build: bool,
    pub toolchain: ToolchainConfig,
    pub extract: ExtractOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            build: true,
            toolchain: ToolchainConfig::default(),
            extract: ExtractOptions::default(),
        }
    }
}

/// Command-line arguments after option parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub config: SessionConfig,
    /// Positional arguments in order.
    pub inputs: Vec<String>,
    /// `--name=<stem>` for inline snippets.
    pub name: Option<String>,
}

/// Parse driver options on top of `base`.
///
/// `-o <dir>` takes the following argument; every other option is a single
/// `--key=value` or `--flag` argument. Anything not starting with `-` is
/// positional (`-` alone is positional too, meaning stdin).
pub fn parse_session_options(args: &[String], base: SessionConfig) -> Result<ParsedArgs, OptionError> {
    let mut parsed = ParsedArgs {
        config: base,
        inputs: Vec::new(),
        name: None,
    };
    let config = &mut parsed.config;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-o" {
            let Some(dir) = args.get(i + 1) else {
                return Err(OptionError::MissingValue { option: "-o".into() });
            };
            config.output_dir = Some(PathBuf::from(dir));
            i += 2;
            continue;
        }

        if let Some(cxx) = arg.strip_prefix("--cxx=") {
            config.toolchain.compiler = PathBuf::from(cxx);
        } else if let Some(dir) = arg.strip_prefix("--toolchain-dir=") {
            config.toolchain.search_dir = Some(PathBuf::from(dir));
        } else if let Some(std) = arg.strip_prefix("--std=") {
            config.toolchain.std = std.to_string();
        } else if let Some(flag) = arg.strip_prefix("--flag=") {
            config.toolchain.extra_flags.push(flag.to_string());
        } else if let Some(platform) = arg.strip_prefix("--platform=") {
            config.toolchain.platform = platform.parse()?;
        } else if let Some(marker) = arg.strip_prefix("--marker=") {
            if marker.trim().is_empty() {
                return Err(OptionError::MissingValue { option: "--marker".into() });
            }
            config.extract = ExtractOptions::default().with_marker(marker);
        } else if let Some(dir) = arg.strip_prefix("--out-dir=") {
            config.output_dir = Some(PathBuf::from(dir));
        } else if arg == "--no-build" {
            config.build = false;
        } else if let Some(name) = arg.strip_prefix("--name=") {
            parsed.name = Some(name.to_string());
        } else if arg == "-" || !arg.starts_with('-') {
            parsed.inputs.push(arg.clone());
        } else {
            return Err(OptionError::Unknown { option: arg.clone() });
        }
        i += 1;
    }

    Ok(parsed)
}
