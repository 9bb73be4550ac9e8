pub mod config;
pub mod engine;
pub mod witness;
pub mod workflow;

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: anything here aborts the run with a nonzero exit.
///
/// Recoverable proving failures live on a separate channel
/// ([`engine::ProveError`]) and are consumed by the workflow controller
/// rather than propagated.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to read verification key at {path}: {source}")]
    VerificationKeyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed verification key at {path}: {source}")]
    VerificationKeyFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha256::digest;
    digest(bytes)
}
