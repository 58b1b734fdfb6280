//! # Action Inputs
//!
//! Turns the loosely typed inputs a workflow step passes (all strings, some
//! empty) into a validated [`PollConfiguration`].

use std::env;
use std::time::Duration;

use tracing::{debug, info};

use crate::aggregate::SuiteSelection;
use crate::config::{ConfigError, PollConfiguration, parse_repository};
use crate::consts::{ENV_GITHUB_REPOSITORY, ENV_GITHUB_RUN_ID, ENV_GITHUB_SHA};
use crate::fetcher::RefTarget;

/// Inputs exactly as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct Inputs {
  /// `owner/repo`; defaults to the workflow's repository
  pub repository: Option<String>,
  /// Ref to watch; defaults to the workflow's commit
  pub git_ref: Option<String>,
  pub interval_seconds: String,
  pub timeout_seconds: Option<String>,
  pub app_slug_filter: Option<String>,
  pub wait_for_a_check_suite: String,
  pub only_first_check_suite: String,
  pub ignore_own_check_suite: String,
}

/// What the surrounding workflow run tells us about itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsContext {
  pub repository: Option<String>,
  pub sha: Option<String>,
  pub run_id: Option<String>,
}

impl ActionsContext {
  /// Read the context from the standard GitHub Actions environment
  pub fn from_env() -> Self {
    let read = |name: &str| env::var(name).ok().filter(|value| !value.is_empty());
    Self {
      repository: read(ENV_GITHUB_REPOSITORY),
      sha: read(ENV_GITHUB_SHA),
      run_id: read(ENV_GITHUB_RUN_ID),
    }
  }
}

/// A validated configuration plus, when the invoking run's own check suite
/// must be ignored, the run whose check suite still has to be looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
  pub config: PollConfiguration,
  pub own_run_id: Option<u64>,
}

/// Parse a boolean input the way workflow authors write them
pub fn parse_boolean(name: &'static str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_ascii_lowercase().as_str() {
    "true" | "yes" | "y" | "on" | "1" => Ok(true),
    "false" | "no" | "n" | "off" | "0" => Ok(false),
    _ => Err(ConfigError::InvalidBoolean {
      name,
      value: value.to_string(),
    }),
  }
}

/// Treat an empty or whitespace-only input as not supplied
fn non_empty(value: Option<&String>) -> Option<&str> {
  value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
  match value.trim().parse::<u64>() {
    Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
    _ => Err(ConfigError::InvalidInterval(value.to_string())),
  }
}

/// Zero and negative timeouts mean "no timeout"
fn parse_timeout(value: Option<&str>) -> Result<Option<Duration>, ConfigError> {
  let Some(value) = value else {
    return Ok(None);
  };
  match value.parse::<i64>() {
    Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds.unsigned_abs()))),
    Ok(_) => Ok(None),
    Err(_) => Err(ConfigError::InvalidTimeout(value.to_string())),
  }
}

fn parse_run_id(value: Option<&str>) -> Result<u64, ConfigError> {
  match value.map(|v| v.parse::<u64>()) {
    Some(Ok(id)) if id > 0 => Ok(id),
    _ => Err(ConfigError::InvalidRunId(value.unwrap_or_default().to_string())),
  }
}

impl Inputs {
  /// Validate the inputs against the workflow context
  pub fn resolve(&self, context: &ActionsContext) -> Result<ResolvedInputs, ConfigError> {
    let repository = non_empty(self.repository.as_ref())
      .or(context.repository.as_deref())
      .ok_or(ConfigError::MissingInput("repository"))?;
    let (owner, repo) = parse_repository(repository)?;

    let git_ref = non_empty(self.git_ref.as_ref())
      .or(context.sha.as_deref())
      .ok_or(ConfigError::MissingInput("ref"))?;

    let interval = parse_interval(&self.interval_seconds)?;
    let timeout = parse_timeout(non_empty(self.timeout_seconds.as_ref()))?;
    let app_slug_filter = non_empty(self.app_slug_filter.as_ref()).map(str::to_string);

    let wait_for_a_check_suite = parse_boolean("waitForACheckSuite", &self.wait_for_a_check_suite)?;
    let only_first_check_suite = parse_boolean("onlyFirstCheckSuite", &self.only_first_check_suite)?;
    let mut ignore_own_check_suite = parse_boolean("ignoreOwnCheckSuite", &self.ignore_own_check_suite)?;

    // Our own check suite only exists in the repository this workflow runs in
    if ignore_own_check_suite && context.repository.as_deref() != Some(repository) {
      info!("Not ignoring the own check suite: {repository} is not the repository this workflow runs in");
      ignore_own_check_suite = false;
    }

    let own_run_id = if ignore_own_check_suite {
      Some(parse_run_id(context.run_id.as_deref())?)
    } else {
      None
    };

    let config = PollConfiguration {
      target: RefTarget {
        owner,
        repo,
        git_ref: git_ref.to_string(),
      },
      interval,
      timeout,
      selection: SuiteSelection {
        app_slug_filter,
        wait_for_a_check_suite,
        only_first_check_suite,
        exclude_check_suite_id: None,
      },
    };
    debug!(?config, ?own_run_id, "Resolved inputs");

    Ok(ResolvedInputs { config, own_run_id })
  }
}
