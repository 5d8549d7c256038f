#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store manifest {path} is from a newer version ({found}, supported {supported})")]
    ManifestVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("bounds table error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("failed to write QA export: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
