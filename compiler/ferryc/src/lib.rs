//! Ferry driver library.
//!
//! Wires the pipeline crates together and talks to the outside world:
//! reading sources, writing generated files atomically, invoking the
//! compiler, and releasing stale library instances.
//!
//! - `Session` runs extract → emit → build → bind for one source file
//! - `Toolchain` / `SystemCompiler` compile the boundary source
//! - `HandleRecord` and `release_stale_artifact` manage the loaded instance
//! - `commands` holds the CLI handlers used by the `ferry` binary

pub mod commands;
mod config;
mod error;
mod handle_record;
mod output;
mod paths;
mod session;
pub mod testing;
mod toolchain;
mod unload;

pub use config::{
    parse_session_options, ParsedArgs, SessionConfig, ToolchainConfig, CXX_ENV, DEFAULT_CXX,
    DEFAULT_STD,
};
pub use error::{BuildError, OptionError, SessionError};
pub use handle_record::{HandleRecord, HandleRecordError};
pub use output::write_atomic;
pub use paths::{SourcePaths, BOUNDARY_SUFFIX};
pub use session::{Session, SessionReport};
pub use toolchain::{diagnostics_report_error, BuildReport, BuildRequest, SystemCompiler, Toolchain};
pub use unload::{release_stale_artifact, ArtifactUnloader, UnloadOutcome};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable selecting the indented tree log format.
pub const LOG_TREE_ENV: &str = "FERRY_LOG_TREE";

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. `FERRY_LOG_TREE=1` renders spans
/// as an indented tree instead of flat lines. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = std::env::var(LOG_TREE_ENV).is_ok_and(|v| v != "0" && !v.is_empty());

        if tree {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
