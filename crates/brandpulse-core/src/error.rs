use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("cannot read vocabulary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vocabulary json: {0}")]
    Json(#[from] serde_json::Error),
}
