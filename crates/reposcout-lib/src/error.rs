use thiserror::Error;

/// Convenient result alias for the reposcout library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the search service rejects a request.
    #[error("search request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Raised when the search service reports an exhausted rate limit.
    #[error("API rate limit exceeded; wait a moment or authenticate with GITHUB_TOKEN")]
    RateLimited,

    /// Raised when a configured search host cannot form a valid URL.
    #[error("invalid search host: {host}")]
    InvalidHost { host: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
