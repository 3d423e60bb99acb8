use std::path::PathBuf;

/// Errors raised while loading, selecting, renaming or merging tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected 14 tab-separated fields, found {fields}")]
    MalformedRow { line: usize, fields: usize },
    #[error("table is missing required column {0:?}")]
    MissingColumn(String),
    #[error("rename prefix list is empty")]
    InvalidPrefix,
    #[error("cannot rename variant {0:?}: expected at least two '_'-separated parts")]
    RenameFailed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
