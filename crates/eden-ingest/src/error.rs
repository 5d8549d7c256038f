#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("geometry source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("failed to read geometry source {path}: {source}")]
    Shapefile {
        path: PathBuf,
        #[source]
        source: shapefile::Error,
    },

    #[error("geometry source {path} contains zero features; wrong file?")]
    EmptySource { path: PathBuf },

    #[error(
        "geometry source has no CRS ({path} missing or unreadable); \
         area and bounds are meaningless without one"
    )]
    MissingCrs { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
