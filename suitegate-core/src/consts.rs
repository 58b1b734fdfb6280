//! Constants for suitegate
//!
//! Names of the GitHub Actions environment variables suitegate reads, and the
//! defaults applied when an input is left out.

/// `owner/repo` of the repository the workflow runs in
pub const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";

/// Commit SHA that triggered the workflow
pub const ENV_GITHUB_SHA: &str = "GITHUB_SHA";

/// Unique id of the current workflow run
pub const ENV_GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";

/// File that step outputs are appended to
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Set to `true` when running inside GitHub Actions
pub const ENV_GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";

/// Set to `1` when the workflow run was re-run with debug logging
pub const ENV_RUNNER_DEBUG: &str = "RUNNER_DEBUG";

/// API root, set to the GHES API URL on GitHub Enterprise Server
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";

/// Seconds between polls when not configured
pub const DEFAULT_INTERVAL_SECONDS: &str = "10";

/// Name of the step output carrying the conclusion
pub const OUTPUT_CONCLUSION: &str = "conclusion";
