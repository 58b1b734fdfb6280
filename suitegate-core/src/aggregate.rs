//! # Snapshot Evaluation
//!
//! Reduces one tick's snapshot to a single verdict: keep polling, or resolve
//! with an outcome. Everything here is pure so each selection step and the
//! priority rules can be tested without timers or a network.

use std::fmt;

use serde::Serialize;

use crate::suite::{CheckSuite, CheckSuiteConclusion, CheckSuiteStatus, Snapshot};

/// Which suites of a snapshot take part in aggregation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteSelection {
  /// Only suites produced by the app with exactly this slug
  pub app_slug_filter: Option<String>,
  /// Keep polling while no relevant suite exists instead of succeeding
  pub wait_for_a_check_suite: bool,
  /// Only the earliest created suite (after slug filtering)
  pub only_first_check_suite: bool,
  /// The invoking run's own check suite, which must never gate itself
  pub exclude_check_suite_id: Option<u64>,
}

/// Terminal result of a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
  /// Every relevant suite completed; this is the most severe conclusion
  Concluded(CheckSuiteConclusion),
  /// No relevant suite exists and waiting for one was not requested
  NoRelevantSuites,
}

impl PollOutcome {
  pub const fn is_success(self) -> bool {
    matches!(
      self,
      PollOutcome::Concluded(CheckSuiteConclusion::Success) | PollOutcome::NoRelevantSuites
    )
  }

  /// Value reported to the invoking workflow step
  pub const fn as_str(self) -> &'static str {
    match self {
      PollOutcome::Concluded(conclusion) => conclusion.as_str(),
      PollOutcome::NoRelevantSuites => CheckSuiteConclusion::Success.as_str(),
    }
  }
}

impl fmt::Display for PollOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Why a tick did not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingReason {
  /// No suite is relevant yet and the selection waits for one
  AwaitingSuite,
  /// At least one relevant suite has not completed
  Status(CheckSuiteStatus),
}

/// Result of evaluating one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickVerdict {
  Pending(PendingReason),
  Resolved(PollOutcome),
}

/// Least-advanced status of the given suites; `Completed` for none
pub fn aggregate_status<'a>(suites: impl IntoIterator<Item = &'a CheckSuite>) -> CheckSuiteStatus {
  suites
    .into_iter()
    .map(CheckSuite::status)
    .max()
    .unwrap_or(CheckSuiteStatus::Completed)
}

/// Most severe conclusion among the completed suites given; `Success` for none
pub fn aggregate_conclusion<'a>(suites: impl IntoIterator<Item = &'a CheckSuite>) -> CheckSuiteConclusion {
  suites
    .into_iter()
    .filter_map(CheckSuite::conclusion)
    .max()
    .unwrap_or(CheckSuiteConclusion::Success)
}

/// Keep only suites whose app slug equals `filter` exactly
pub fn filter_by_app_slug<'a>(suites: &'a [CheckSuite], filter: Option<&str>) -> Vec<&'a CheckSuite> {
  match filter {
    Some(slug) => suites.iter().filter(|suite| suite.app_slug == slug).collect(),
    None => suites.iter().collect(),
  }
}

/// The single earliest created suite. Equal timestamps go to the lowest id.
pub fn earliest_created<'a>(suites: &[&'a CheckSuite]) -> Option<&'a CheckSuite> {
  suites
    .iter()
    .copied()
    .min_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
}

/// Drop every suite carrying the excluded id
pub fn exclude_check_suite<'a>(suites: Vec<&'a CheckSuite>, excluded: Option<u64>) -> Vec<&'a CheckSuite> {
  match excluded {
    Some(id) => suites.into_iter().filter(|suite| suite.id != id).collect(),
    None => suites,
  }
}

/// Apply the app slug filter and the earliest-created restriction
pub fn candidate_suites<'a>(snapshot: &'a Snapshot, selection: &SuiteSelection) -> Vec<&'a CheckSuite> {
  let working = filter_by_app_slug(&snapshot.suites, selection.app_slug_filter.as_deref());

  if selection.only_first_check_suite {
    earliest_created(&working).into_iter().collect()
  } else {
    working
  }
}

/// Decide whether this tick's snapshot settles the poll
pub fn evaluate(snapshot: &Snapshot, selection: &SuiteSelection) -> TickVerdict {
  let candidates = candidate_suites(snapshot, selection);

  if candidates.is_empty() {
    return if selection.wait_for_a_check_suite {
      TickVerdict::Pending(PendingReason::AwaitingSuite)
    } else {
      TickVerdict::Resolved(PollOutcome::NoRelevantSuites)
    };
  }

  // Only our own suite matched; nothing else can still be waited on
  let working = exclude_check_suite(candidates, selection.exclude_check_suite_id);
  if working.is_empty() {
    return TickVerdict::Resolved(PollOutcome::NoRelevantSuites);
  }

  match aggregate_status(working.iter().copied()) {
    CheckSuiteStatus::Completed => {
      TickVerdict::Resolved(PollOutcome::Concluded(aggregate_conclusion(working.iter().copied())))
    }
    status => TickVerdict::Pending(PendingReason::Status(status)),
  }
}

/// Per-suite record logged when a poll resolves unsuccessfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteDiagnostic {
  pub id: u64,
  pub app_slug: String,
  pub status: CheckSuiteStatus,
  pub conclusion: Option<CheckSuiteConclusion>,
}

/// Summarize every suite of a snapshot, relevant or not
pub fn diagnose(snapshot: &Snapshot) -> Vec<SuiteDiagnostic> {
  snapshot
    .suites
    .iter()
    .map(|suite| SuiteDiagnostic {
      id: suite.id,
      app_slug: suite.app_slug.clone(),
      status: suite.status(),
      conclusion: suite.conclusion(),
    })
    .collect()
}
