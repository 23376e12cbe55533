// Typed sampling failures. The dashboard loop turns these into "keep the cached value".

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// Counter source could not be read (missing file, permissions).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Counter source was readable but its contents were malformed.
    #[error("malformed {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    /// Capacity query failed for a single mount.
    #[error("capacity query failed for {}: {source}", path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing contributed to the result.
    #[error("no data contributed to the result")]
    Empty,

    #[error("sampling task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SampleError {
    pub(crate) fn parse(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Parse {
            what,
            reason: reason.into(),
        }
    }
}
