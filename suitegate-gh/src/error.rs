//! # GitHub Client Errors
//!
//! Typed failures surfaced by the GitHub client. None of these are retried by
//! the client; callers decide what a failure means for them.

use thiserror::Error;

/// Errors returned by [`crate::GitHubClient`] endpoints
#[derive(Debug, Error)]
pub enum GitHubError {
  /// The API answered with a non-success status code
  #[error("GitHub API request to {url} failed with HTTP {status}: {message}")]
  Status { url: String, status: u16, message: String },

  /// The request never produced a response (DNS, TLS, connection reset, ...)
  #[error("GitHub API request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The configured API root cannot be used as a base URL
  #[error("Invalid GitHub API URL '{url}': {message}")]
  InvalidUrl { url: String, message: String },

  /// A success response whose body could not be decoded
  #[error("Failed to decode GitHub API response from {url}: {message}")]
  Decode { url: String, message: String },
}

impl GitHubError {
  /// HTTP status code of the failed request, if one was received
  pub fn status_code(&self) -> Option<u16> {
    match self {
      GitHubError::Status { status, .. } => Some(*status),
      GitHubError::Request(e) => e.status().map(|s| s.as_u16()),
      GitHubError::InvalidUrl { .. } | GitHubError::Decode { .. } => None,
    }
  }
}
