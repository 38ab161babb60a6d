//! The handle record: numeric handle of the last loaded library instance.
//!
//! The generated host module writes it right after loading the artifact.
//! The driver reads it before regenerating so the stale instance can be
//! released first.

use std::io;
use std::path::{Path, PathBuf};

use ferry_bindings::handle_record_name;

use crate::output::write_atomic;

/// Loaded-library handle, opaque apart from being an integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandleRecord {
    pub handle: u64,
}

/// Handle record that exists but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum HandleRecordError {
    #[error("cannot read handle record `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("handle record `{}` does not hold an integer: `{contents}`", path.display())]
    Malformed { path: PathBuf, contents: String },
}

impl HandleRecord {
    pub fn new(handle: u64) -> Self {
        Self { handle }
    }

    /// Record location for the source stem `stem` in `dir`.
    pub fn path_for(dir: &Path, stem: &str) -> PathBuf {
        dir.join(handle_record_name(stem))
    }

    /// Read the record at `path`; `Ok(None)` when there is none.
    pub fn read(path: &Path) -> Result<Option<Self>, HandleRecordError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(HandleRecordError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<u64>()
            .map(|handle| Some(Self { handle }))
            .map_err(|_| HandleRecordError::Malformed {
                path: path.to_path_buf(),
                contents: trimmed.to_string(),
            })
    }

    /// Write the record as a single integer literal.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        write_atomic(path, self.handle.to_string().as_bytes())
    }
}
