//! # GitHub API Client
//!
//! Provides the small slice of the GitHub REST API that suitegate needs:
//! listing the check suites attached to a ref and looking up a workflow run to
//! discover which check suite it belongs to.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
// Re-export the error type
pub use error::GitHubError;
// Re-export models
pub use models::{GitHubApp, GitHubAuth, GitHubCheckSuite, GitHubWorkflowRun};
