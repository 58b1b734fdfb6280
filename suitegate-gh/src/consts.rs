//! Constants for the suitegate-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("suitegate/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github+json";

/// REST API version pinned for every request
pub const API_VERSION: &str = "2022-11-28";

/// Largest page size the check suites endpoint accepts
pub const CHECK_SUITES_PER_PAGE: u32 = 100;
