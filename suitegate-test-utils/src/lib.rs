//! Test utilities shared across the suitegate workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable overrides that restore on drop ([`EnvVarGuard`])
//! - A temporary `$GITHUB_OUTPUT` file ([`GitHubOutputGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod output;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use output::GitHubOutputGuard;
