#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("no regions for scheme={scheme} level={level}")]
    EmptySelection { scheme: String, level: i64 },

    #[error("region {uid} has a missing or invalid code")]
    MissingCode { uid: String },

    #[error(
        "duplicate code {code} for scheme={scheme} level={level}; codes must be unique per scheme+level"
    )]
    DuplicateCode {
        code: String,
        scheme: String,
        level: i64,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
