/// travlogs error types and handling utilities
use std::path::PathBuf;

/// Main error type for graph construction, caching and queries
#[derive(Debug, thiserror::Error)]
pub enum TravlogError {
    /// An accepted compilation record lacks a required key (index is 1-based)
    #[error("missing key '{missing}' in compilation object #{index}")]
    MalformedRecord { index: usize, missing: &'static str },
    /// An accepted compilation record has a key of the wrong shape (index is 1-based)
    #[error("invalid compilation object #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    /// One or more query start names are not present in the graph
    #[error("names not found: {}", .names.join(", "))]
    UnresolvedStartNames { names: Vec<String> },
    /// The build log is not a JSON array of compilation records
    #[error("cannot parse build log: {reason}")]
    LogParse { reason: String },
    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A cache line could not be decoded; never surfaced past the cache layer
    #[error("malformed cache line {line}: {reason}")]
    CacheFormat { line: usize, reason: String },
    /// Wrapped anyhow error for compatibility
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TravlogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TravlogError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = TravlogError> = std::result::Result<T, E>;

/// Query-time errors leave the loaded graph valid for a corrected retry.
pub fn is_query_error(err: &TravlogError) -> bool {
    match err {
        TravlogError::UnresolvedStartNames { .. } => true,
        TravlogError::MalformedRecord { .. } => false,
        TravlogError::InvalidRecord { .. } => false,
        TravlogError::LogParse { .. } => false,
        TravlogError::Io { .. } => false,
        TravlogError::CacheFormat { .. } => false,
        TravlogError::Other(_) => false,
    }
}
