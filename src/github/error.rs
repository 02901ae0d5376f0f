//! GitHub-specific error handling.

use thiserror::Error;

/// GitHub REST API specific errors.
#[derive(Error, Debug)]
pub enum GithubError {
    /// API request rejected with an HTTP error status.
    #[error("GitHub API request failed: {0}")]
    ApiRequestFailed(String),

    /// Response body did not have the expected shape.
    #[error("Invalid response format from GitHub API: {0}")]
    InvalidResponseFormat(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

// Note: anyhow already has a blanket impl for thiserror::Error types
