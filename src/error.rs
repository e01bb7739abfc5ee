use thiserror::Error;

/// Errors raised while loading a corpus.
///
/// Searching never returns these: once a corpus is in memory, a failed match
/// is an empty result, not an error.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while interpreting grade text supplied by a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("unknown grading system '{0}'")]
    UnknownSystem(String),

    #[error("expected SYSTEM:VALUE, got '{0}'")]
    MissingValue(String),
}
