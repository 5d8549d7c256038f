#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("code field {field:?} not found; available columns: {columns:?}")]
    CodeFieldNotFound { field: String, columns: Vec<String> },

    #[error(
        "couldn't confidently infer the code column; pass one explicitly\n\
         columns: {columns:?}\n\
         top candidates: {candidates:?}"
    )]
    AmbiguousCodeField {
        columns: Vec<String>,
        /// Best-scoring candidates as "column (score)", at most eight.
        candidates: Vec<String>,
    },

    #[error(
        "none of the requested codes matched the source\n\
         using code field: {code_field}\n\
         requested codes: {wanted:?}\n\
         sample codes in source: {sample_codes:?}"
    )]
    NoMatches {
        code_field: String,
        wanted: Vec<String>,
        /// Up to 25 distinct normalized codes actually present.
        sample_codes: Vec<String>,
    },

    #[error("geometries have no CRS; can't compute area or bounds safely")]
    MissingCrs,

    #[error("failed to build transform {from} -> {to}: {source}")]
    ProjCreate {
        from: String,
        to: String,
        #[source]
        source: proj::ProjCreateError,
    },

    #[error("reprojection failed: {0}")]
    Proj(#[from] proj::ProjError),

    #[error(
        "missing requested codes after processing: {missing:?}; \
         the source may not include them, or codes are stored differently"
    )]
    IncompleteRegistry { missing: Vec<String> },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
