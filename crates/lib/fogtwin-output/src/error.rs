use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write assignment table: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to configure the logger: {0}")]
    Logger(String),
}

impl OutputError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        OutputError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
