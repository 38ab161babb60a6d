//! The `generate` and `build` commands.

use std::path::Path;

use crate::config::SessionConfig;
use crate::session::Session;
use crate::unload::UnloadOutcome;

/// Run one session over `path` and print what was produced.
pub fn run_session(path: &str, config: SessionConfig) {
    let session = Session::new(config);
    let report = match session.run(Path::new(path)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_build_failure() {
                eprintln!("note: no binding module was written");
            }
            std::process::exit(1);
        }
    };

    if let Some(UnloadOutcome::Failed { reason, .. }) = &report.unload {
        eprintln!("warning: previous library instance was not unloaded: {reason}");
    }
    if !report.diagnostics.trim().is_empty() {
        eprint!("{}", report.diagnostics);
    }

    println!(
        "generated {} ({} symbols)",
        report.paths.boundary_source.display(),
        report.symbols.len()
    );
    if let Some(artifact) = &report.artifact {
        println!("built {}", artifact.display());
    }
    let names: Vec<&str> = report.bindings.public_bindings().map(|b| b.name()).collect();
    println!(
        "wrote {}  [{}]",
        report.binding_module.display(),
        names.join(", ")
    );
}
