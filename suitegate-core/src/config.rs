//! # Poll Configuration
//!
//! The immutable configuration a poll runs with, and the validation errors
//! raised while building it.

use std::time::Duration;

use thiserror::Error;

use crate::aggregate::SuiteSelection;
use crate::fetcher::RefTarget;

/// Everything the poller needs, fixed before the first tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfiguration {
  pub target: RefTarget,
  /// Time between the start of consecutive ticks; never zero
  pub interval: Duration,
  /// Overall budget; `None` waits forever
  pub timeout: Option<Duration>,
  pub selection: SuiteSelection,
}

/// Invalid or missing input, reported before any polling starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Invalid repository '{0}'. Expected format {{owner}}/{{repo}}.")]
  InvalidRepository(String),

  #[error("Input required and not supplied: {0}")]
  MissingInput(&'static str),

  #[error("Invalid intervalSeconds '{0}'. Expected a positive integer.")]
  InvalidInterval(String),

  #[error("Invalid timeoutSeconds '{0}'. Expected an integer.")]
  InvalidTimeout(String),

  #[error("Invalid boolean '{value}' for input {name}. Expected true or false.")]
  InvalidBoolean { name: &'static str, value: String },

  #[error("Expected the environment variable $GITHUB_RUN_ID to be a positive integer, but it is '{0}'.")]
  InvalidRunId(String),

  #[error("Workflow run {run_id} did not report the check suite it belongs to.")]
  MissingCheckSuite { run_id: u64 },
}

/// Split an `owner/repo` coordinate into its two non-empty halves
pub fn parse_repository(repository: &str) -> Result<(String, String), ConfigError> {
  match repository.split('/').collect::<Vec<_>>().as_slice() {
    [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok((owner.to_string(), repo.to_string())),
    _ => Err(ConfigError::InvalidRepository(repository.to_string())),
  }
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[test]
  fn test_parse_repository() {
    assert_eq!(
      parse_repository("octo/hello-world"),
      Ok(("octo".to_string(), "hello-world".to_string()))
    );
  }

  #[test_case("" ; "empty")]
  #[test_case("octo" ; "no slash")]
  #[test_case("octo/" ; "missing repo")]
  #[test_case("/hello" ; "missing owner")]
  #[test_case("octo/hello/extra" ; "too many segments")]
  fn test_parse_repository_rejects(input: &str) {
    assert_eq!(
      parse_repository(input),
      Err(ConfigError::InvalidRepository(input.to_string()))
    );
  }

  #[test]
  fn test_invalid_repository_message() {
    let message = ConfigError::InvalidRepository("octo".to_string()).to_string();
    assert_eq!(message, "Invalid repository 'octo'. Expected format {owner}/{repo}.");
  }

  #[test]
  fn test_timeout_and_check_suite_messages() {
    assert_eq!(
      ConfigError::InvalidTimeout("soon".to_string()).to_string(),
      "Invalid timeoutSeconds 'soon'. Expected an integer."
    );
    assert_eq!(
      ConfigError::MissingCheckSuite { run_id: 7 }.to_string(),
      "Workflow run 7 did not report the check suite it belongs to."
    );
  }
}
