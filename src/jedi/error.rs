use std::path::PathBuf;

use thiserror::Error;

/// Errors from provisioning the resolver's interpreter environment.
///
/// Most provisioning problems are deliberately not errors: create and
/// install failures are logged and the expected path is still returned, so
/// the subsequent spawn surfaces a more actionable failure. What remains
/// here is genuinely unrecoverable.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("no Python interpreter found on PATH (tried: {0})")]
    PythonNotFound(String),

    #[error("failed to deploy resolver script at {path}: {source}")]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("environment at {path} failed verification twice; giving up")]
    PersistentlyCorrupt { path: PathBuf },
}

/// Errors from the resolver process bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to spawn resolver process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("resolver process died before responding")]
    ResolverDied,

    #[error("resolver produced a malformed response: {line:?}")]
    MalformedResponse { line: String },

    #[error("i/o error talking to resolver process: {0}")]
    Io(#[from] std::io::Error),
}
