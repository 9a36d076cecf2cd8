use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no toRad anchor in {path:?}, nothing to insert after")]
    AnchorNotFound { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, PatchError>;
