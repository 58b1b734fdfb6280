//! # Check Suite Model
//!
//! Typed check suites and the ingestion step that turns raw API records into
//! them. Every raw string is parsed exactly once here, so an unknown status or
//! conclusion fails the tick before any aggregation runs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use suitegate_gh::GitHubCheckSuite;
use thiserror::Error;

/// Check suite status, declared from most to least advanced so that the
/// derived ordering makes `max()` the least-advanced status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteStatus {
  Completed,
  InProgress,
  Queued,
}

/// Check suite conclusion, declared from least to most severe so that the
/// derived ordering makes `max()` the most severe conclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteConclusion {
  Success,
  Neutral,
  Failure,
  TimedOut,
  Cancelled,
  ActionRequired,
}

impl CheckSuiteStatus {
  pub const ALL: [CheckSuiteStatus; 3] = [
    CheckSuiteStatus::Queued,
    CheckSuiteStatus::InProgress,
    CheckSuiteStatus::Completed,
  ];

  /// Wire name used by the GitHub API
  pub const fn as_str(self) -> &'static str {
    match self {
      CheckSuiteStatus::Queued => "queued",
      CheckSuiteStatus::InProgress => "in_progress",
      CheckSuiteStatus::Completed => "completed",
    }
  }
}

impl CheckSuiteConclusion {
  /// All conclusions, most severe first
  pub const ALL: [CheckSuiteConclusion; 6] = [
    CheckSuiteConclusion::ActionRequired,
    CheckSuiteConclusion::Cancelled,
    CheckSuiteConclusion::TimedOut,
    CheckSuiteConclusion::Failure,
    CheckSuiteConclusion::Neutral,
    CheckSuiteConclusion::Success,
  ];

  /// Wire name used by the GitHub API
  pub const fn as_str(self) -> &'static str {
    match self {
      CheckSuiteConclusion::ActionRequired => "action_required",
      CheckSuiteConclusion::Cancelled => "cancelled",
      CheckSuiteConclusion::TimedOut => "timed_out",
      CheckSuiteConclusion::Failure => "failure",
      CheckSuiteConclusion::Neutral => "neutral",
      CheckSuiteConclusion::Success => "success",
    }
  }
}

impl fmt::Display for CheckSuiteStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl fmt::Display for CheckSuiteConclusion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CheckSuiteStatus {
  type Err = ConsistencyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "queued" => Ok(CheckSuiteStatus::Queued),
      "in_progress" => Ok(CheckSuiteStatus::InProgress),
      "completed" => Ok(CheckSuiteStatus::Completed),
      other => Err(ConsistencyError::UnknownStatus(other.to_string())),
    }
  }
}

impl FromStr for CheckSuiteConclusion {
  type Err = ConsistencyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "action_required" => Ok(CheckSuiteConclusion::ActionRequired),
      "cancelled" => Ok(CheckSuiteConclusion::Cancelled),
      "timed_out" => Ok(CheckSuiteConclusion::TimedOut),
      "failure" => Ok(CheckSuiteConclusion::Failure),
      "neutral" => Ok(CheckSuiteConclusion::Neutral),
      "success" => Ok(CheckSuiteConclusion::Success),
      other => Err(ConsistencyError::UnknownConclusion(other.to_string())),
    }
  }
}

/// A raw record that does not fit the typed model. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
  #[error("Check suite status '{0}' can't be mapped to a known check suite status")]
  UnknownStatus(String),
  #[error("Check suite conclusion '{0}' can't be mapped to a known check suite conclusion")]
  UnknownConclusion(String),
  #[error("Check suite {id} is completed but has no conclusion")]
  MissingConclusion { id: u64 },
  #[error("Check suite {id} has conclusion '{conclusion}' but its status is '{status}'")]
  UnexpectedConclusion {
    id: u64,
    status: CheckSuiteStatus,
    conclusion: String,
  },
  #[error("Check suite {id} has an unparseable created_at timestamp '{value}'")]
  InvalidTimestamp { id: u64, value: String },
}

/// Lifecycle state of a check suite. A conclusion only exists once the suite
/// is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
  Queued,
  InProgress,
  Completed(CheckSuiteConclusion),
}

impl SuiteState {
  pub const fn status(self) -> CheckSuiteStatus {
    match self {
      SuiteState::Queued => CheckSuiteStatus::Queued,
      SuiteState::InProgress => CheckSuiteStatus::InProgress,
      SuiteState::Completed(_) => CheckSuiteStatus::Completed,
    }
  }

  pub const fn conclusion(self) -> Option<CheckSuiteConclusion> {
    match self {
      SuiteState::Completed(conclusion) => Some(conclusion),
      _ => None,
    }
  }
}

/// One check suite as observed on a single poll tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSuite {
  pub id: u64,
  pub app_slug: String,
  pub state: SuiteState,
  pub created_at: DateTime<Utc>,
}

impl CheckSuite {
  pub const fn status(&self) -> CheckSuiteStatus {
    self.state.status()
  }

  pub const fn conclusion(&self) -> Option<CheckSuiteConclusion> {
    self.state.conclusion()
  }
}

impl TryFrom<&GitHubCheckSuite> for CheckSuite {
  type Error = ConsistencyError;

  fn try_from(raw: &GitHubCheckSuite) -> Result<Self, Self::Error> {
    let status: CheckSuiteStatus = raw.status.parse()?;

    let state = match (status, raw.conclusion.as_deref()) {
      (CheckSuiteStatus::Completed, Some(conclusion)) => SuiteState::Completed(conclusion.parse()?),
      (CheckSuiteStatus::Completed, None) => return Err(ConsistencyError::MissingConclusion { id: raw.id }),
      (CheckSuiteStatus::Queued, None) => SuiteState::Queued,
      (CheckSuiteStatus::InProgress, None) => SuiteState::InProgress,
      (status, Some(conclusion)) => {
        return Err(ConsistencyError::UnexpectedConclusion {
          id: raw.id,
          status,
          conclusion: conclusion.to_string(),
        });
      }
    };

    let created_at = DateTime::parse_from_rfc3339(&raw.created_at)
      .map_err(|_| ConsistencyError::InvalidTimestamp {
        id: raw.id,
        value: raw.created_at.clone(),
      })?
      .with_timezone(&Utc);

    Ok(Self {
      id: raw.id,
      app_slug: raw.app_slug().to_string(),
      state,
      created_at,
    })
  }
}

/// Every check suite attached to the ref on one tick, in API order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
  pub suites: Vec<CheckSuite>,
}

impl Snapshot {
  /// Convert a raw API listing into a typed snapshot, failing on the first
  /// record that does not fit the model
  pub fn ingest(raw: &[GitHubCheckSuite]) -> Result<Self, ConsistencyError> {
    let suites = raw.iter().map(CheckSuite::try_from).collect::<Result<Vec<_>, _>>()?;
    Ok(Self { suites })
  }

  pub fn is_empty(&self) -> bool {
    self.suites.is_empty()
  }

  pub fn len(&self) -> usize {
    self.suites.len()
  }
}
