use std::path::PathBuf;

use thiserror::Error;

/// Storage-level fault. Any of these means the store could not be consulted,
/// as opposed to a register conflict or a failed login.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Credential store {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential store {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Credential database error: {0}")]
    Database(#[from] sqlx::Error),
}
