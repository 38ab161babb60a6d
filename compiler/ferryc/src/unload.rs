//! Releasing the previously loaded artifact before regeneration.
//!
//! Unloading is best effort. The outcome is returned as a value so callers
//! see whether anything was released, and a failure is logged as a warning
//! instead of aborting the run.

use std::path::Path;

use crate::handle_record::HandleRecord;
use crate::output::remove_if_present;

/// Unloads a library instance by its recorded handle.
///
/// Implemented by whatever owns the host process (an embedding runtime,
/// an editor integration); the CLI runs out of process and has none.
pub trait ArtifactUnloader {
    fn unload(&self, handle: u64) -> Result<(), String>;
}

/// What happened to the stale library instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnloadOutcome {
    Unloaded { handle: u64 },
    NothingToUnload,
    /// `handle` is `None` when the record itself could not be read.
    Failed { handle: Option<u64>, reason: String },
}

impl UnloadOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Release the instance named by the handle record at `record_path`.
///
/// A successful unload removes the record, since the handle no longer
/// names a live instance.
pub fn release_stale_artifact(record_path: &Path, unloader: &dyn ArtifactUnloader) -> UnloadOutcome {
    let outcome = match HandleRecord::read(record_path) {
        Ok(None) => UnloadOutcome::NothingToUnload,
        Ok(Some(record)) => match unloader.unload(record.handle) {
            Ok(()) => {
                if let Err(e) = remove_if_present(record_path) {
                    tracing::debug!(error = %e, "stale handle record left in place");
                }
                UnloadOutcome::Unloaded {
                    handle: record.handle,
                }
            }
            Err(reason) => UnloadOutcome::Failed {
                handle: Some(record.handle),
                reason,
            },
        },
        Err(e) => UnloadOutcome::Failed {
            handle: None,
            reason: e.to_string(),
        },
    };

    match &outcome {
        UnloadOutcome::Failed { handle, reason } => {
            tracing::warn!(?handle, %reason, "failed to unload stale artifact, continuing");
        }
        UnloadOutcome::Unloaded { handle } => tracing::debug!(handle, "stale artifact unloaded"),
        UnloadOutcome::NothingToUnload => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockUnloader;
    use pretty_assertions::assert_eq;

    fn record_dir(contents: Option<&str>) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = HandleRecord::path_for(dir.path(), "model");
        if let Some(text) = contents {
            std::fs::write(&path, text).unwrap_or_else(|e| panic!("write: {e}"));
        }
        (dir, path)
    }

    #[test]
    fn test_no_record_means_nothing_to_unload() {
        let (_dir, path) = record_dir(None);
        let unloader = MockUnloader::succeeding();
        let handles = unloader.handles();
        assert_eq!(release_stale_artifact(&path, &unloader), UnloadOutcome::NothingToUnload);
        assert!(handles.borrow().is_empty());
    }

    #[test]
    fn test_recorded_handle_is_unloaded_and_record_removed() {
        let (_dir, path) = record_dir(Some("4242\n"));
        let unloader = MockUnloader::succeeding();
        let handles = unloader.handles();
        assert_eq!(
            release_stale_artifact(&path, &unloader),
            UnloadOutcome::Unloaded { handle: 4242 }
        );
        assert_eq!(*handles.borrow(), vec![4242]);
        assert!(!path.exists());
    }

    #[test]
    fn test_unload_failure_is_reported_not_raised() {
        let (_dir, path) = record_dir(Some("7"));
        let unloader = MockUnloader::failing("library still in use");
        let outcome = release_stale_artifact(&path, &unloader);
        assert_eq!(
            outcome,
            UnloadOutcome::Failed {
                handle: Some(7),
                reason: "library still in use".into(),
            }
        );
        assert!(outcome.is_failure());
        assert!(path.exists());
    }

    #[test]
    fn test_unreadable_record_is_a_failure_without_handle() {
        let (_dir, path) = record_dir(Some("not a number"));
        let unloader = MockUnloader::succeeding();
        let outcome = release_stale_artifact(&path, &unloader);
        assert!(matches!(outcome, UnloadOutcome::Failed { handle: None, .. }));
        assert!(unloader.handles().borrow().is_empty());
    }
}
