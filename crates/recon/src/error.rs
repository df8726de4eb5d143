use thiserror::Error;

/// Failure to enumerate a namespace. Raised before any comparison runs.
#[derive(Debug, Error)]
pub enum ListingError {
    /// File read error.
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
    /// A JSON entry that does not decode as a listing record.
    #[error("{path}:{line}: malformed listing entry: {message}")]
    Json {
        path: String,
        line: usize,
        message: String,
    },
    /// CSV header or field error.
    #[error("{path}: {message}")]
    Csv { path: String, message: String },
    /// The storage client recorded an error while listing.
    #[error("{path}:{line}: listing reported an error: {message}")]
    ErrorEntry {
        path: String,
        line: usize,
        message: String,
    },
    #[error("cannot infer listing format from '{0}' (expected .jsonl, .ndjson, .json or .csv)")]
    UnknownFormat(String),
}
