//! # Check Suite Poller
//!
//! Owns the polling loop. Ticks are strictly sequential: the interval is only
//! awaited again once the previous fetch has been evaluated. The optional
//! timeout wraps the whole loop, so whichever of resolution or timeout comes
//! first drops the other along with any in-flight request.

use std::time::Duration;

use suitegate_gh::GitHubError;
use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::aggregate::{PollOutcome, TickVerdict, diagnose, evaluate};
use crate::config::PollConfiguration;
use crate::fetcher::CheckSuiteFetcher;
use crate::suite::{ConsistencyError, Snapshot};

/// Fatal poll failures. No outcome is produced when one of these is returned.
#[derive(Debug, Error)]
pub enum PollError {
  #[error(transparent)]
  Transport(#[from] GitHubError),

  #[error(transparent)]
  Consistency(#[from] ConsistencyError),

  #[error("Timeout of {timeout_seconds} seconds reached after {elapsed_seconds} seconds.")]
  Timeout { timeout_seconds: u64, elapsed_seconds: u64 },
}

/// Polls a ref's check suites until they settle
pub struct CheckSuitePoller<F> {
  fetcher: F,
}

impl<F: CheckSuiteFetcher> CheckSuitePoller<F> {
  pub const fn new(fetcher: F) -> Self {
    Self { fetcher }
  }

  /// Poll until the relevant check suites resolve, the timeout elapses, or a
  /// fetch fails
  pub async fn run(&self, config: &PollConfiguration) -> Result<PollOutcome, PollError> {
    let started = Instant::now();
    info!(
      target_ref = %config.target,
      interval_seconds = config.interval.as_secs(),
      timeout_seconds = config.timeout.map(|t| t.as_secs()),
      "Waiting for check suites"
    );

    let polling = self.poll_until_resolved(config);
    let Some(timeout) = config.timeout else {
      return polling.await;
    };

    // The inner future is polled before the deadline, so a resolution landing
    // on the deadline still wins
    match time::timeout_at(started + timeout, polling).await {
      Ok(result) => result,
      Err(_) => {
        let elapsed = started.elapsed();
        warn!(elapsed_seconds = elapsed.as_secs(), "Gave up waiting for check suites");
        Err(PollError::Timeout {
          timeout_seconds: timeout.as_secs(),
          elapsed_seconds: round_seconds(elapsed),
        })
      }
    }
  }

  async fn poll_until_resolved(&self, config: &PollConfiguration) -> Result<PollOutcome, PollError> {
    let mut interval = time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tick: u64 = 0;
    loop {
      interval.tick().await;

      match self.poll_once(config).await? {
        TickVerdict::Resolved(outcome) => {
          info!(tick, %outcome, "Check suites resolved");
          return Ok(outcome);
        }
        TickVerdict::Pending(reason) => debug!(tick, ?reason, "Check suites still pending"),
      }
      tick += 1;
    }
  }

  /// Fetch and evaluate a single snapshot
  pub async fn poll_once(&self, config: &PollConfiguration) -> Result<TickVerdict, PollError> {
    let raw = self.fetcher.fetch(&config.target).await?;
    let snapshot = Snapshot::ingest(&raw)?;
    debug!(suites = snapshot.len(), "Fetched check suite snapshot");

    let verdict = evaluate(&snapshot, &config.selection);
    match verdict {
      TickVerdict::Resolved(PollOutcome::NoRelevantSuites) => match &config.selection.app_slug_filter {
        Some(slug) => info!("No check suites with the app slug '{slug}' exist for {}.", config.target),
        None => info!("No check suites exist for {}.", config.target),
      },
      TickVerdict::Resolved(outcome) if !outcome.is_success() => report_unsuccessful(&snapshot),
      _ => {}
    }

    Ok(verdict)
  }
}

/// Log every suite of the snapshot so an operator can see which one failed
fn report_unsuccessful(snapshot: &Snapshot) {
  error!("One or more check suites were unsuccessful. Below is some metadata on the check suites.");
  match serde_json::to_string(&diagnose(snapshot)) {
    Ok(json) => error!("{json}"),
    Err(e) => warn!("Failed to serialize check suite diagnostics: {e}"),
  }
}

fn round_seconds(elapsed: Duration) -> u64 {
  elapsed.as_secs() + u64::from(elapsed.subsec_millis() >= 500)
}

#[cfg(test)]
mod tests {
  use std::collections::VecDeque;
  use std::future::Future;
  use std::sync::Mutex;
  use std::sync::atomic::{AtomicUsize, Ordering};

  use suitegate_gh::{GitHubApp, GitHubCheckSuite};

  use super::*;
  use crate::aggregate::SuiteSelection;
  use crate::fetcher::RefTarget;
  use crate::suite::CheckSuiteConclusion;

  #[derive(Clone)]
  enum Step {
    Suites(Vec<GitHubCheckSuite>),
    HttpStatus(u16),
  }

  /// Replays a script of responses; the last step repeats forever
  struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
  }

  impl ScriptedFetcher {
    fn new(steps: Vec<Step>) -> Self {
      Self {
        steps: Mutex::new(steps.into()),
        calls: AtomicUsize::new(0),
      }
    }

    fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  impl CheckSuiteFetcher for &ScriptedFetcher {
    fn fetch(&self, target: &RefTarget) -> impl Future<Output = Result<Vec<GitHubCheckSuite>, GitHubError>> + Send {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let mut steps = self.steps.lock().unwrap();
      let step = if steps.len() > 1 {
        steps.pop_front().unwrap()
      } else {
        steps.front().cloned().unwrap()
      };
      let result = match step {
        Step::Suites(suites) => Ok(suites),
        Step::HttpStatus(status) => Err(GitHubError::Status {
          url: format!("https://api.github.com/repos/{}/{}/commits/{}/check-suites", target.owner, target.repo, target.git_ref),
          status,
          message: "Server Error".to_string(),
        }),
      };
      std::future::ready(result)
    }
  }

  /// A fetch that never answers
  struct HangingFetcher;

  impl CheckSuiteFetcher for HangingFetcher {
    fn fetch(&self, _target: &RefTarget) -> impl Future<Output = Result<Vec<GitHubCheckSuite>, GitHubError>> + Send {
      std::future::pending()
    }
  }

  fn raw(id: u64, slug: &str, status: &str, conclusion: Option<&str>) -> GitHubCheckSuite {
    GitHubCheckSuite {
      id,
      app: Some(GitHubApp { slug: slug.to_string() }),
      status: status.to_string(),
      conclusion: conclusion.map(str::to_string),
      created_at: format!("2024-03-01T12:00:{:02}Z", id % 60),
    }
  }

  fn config(selection: SuiteSelection, interval_seconds: u64, timeout_seconds: Option<u64>) -> PollConfiguration {
    PollConfiguration {
      target: RefTarget {
        owner: "octo".to_string(),
        repo: "hello".to_string(),
        git_ref: "main".to_string(),
      },
      interval: Duration::from_secs(interval_seconds),
      timeout: timeout_seconds.map(Duration::from_secs),
      selection,
    }
  }

  /// Paused-clock elapsed time, allowing for millisecond timer rounding
  fn assert_elapsed(started: Instant, seconds: u64) {
    let elapsed = started.elapsed();
    let expected = Duration::from_secs(seconds);
    assert!(
      elapsed >= expected && elapsed < expected + Duration::from_millis(50),
      "expected ~{seconds}s, got {elapsed:?}"
    );
  }

  fn waiting() -> SuiteSelection {
    SuiteSelection {
      wait_for_a_check_suite: true,
      ..Default::default()
    }
  }

  #[tokio::test(start_paused = true)]
  async fn test_already_completed_resolves_on_first_tick() {
    let fetcher = ScriptedFetcher::new(vec![Step::Suites(vec![
      raw(1, "a", "completed", Some("success")),
      raw(2, "b", "completed", Some("neutral")),
    ])]);
    let started = Instant::now();

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(SuiteSelection::default(), 10, None))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::Concluded(CheckSuiteConclusion::Neutral));
    assert_eq!(fetcher.calls(), 1);
    assert_elapsed(started, 0);
  }

  #[tokio::test(start_paused = true)]
  async fn test_empty_snapshot_without_waiting_fetches_once() {
    let fetcher = ScriptedFetcher::new(vec![Step::Suites(vec![])]);

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(SuiteSelection::default(), 10, None))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::NoRelevantSuites);
    assert!(outcome.is_success());
    assert_eq!(fetcher.calls(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_waits_for_a_suite_to_appear() {
    let fetcher = ScriptedFetcher::new(vec![
      Step::Suites(vec![]),
      Step::Suites(vec![raw(1, "a", "completed", Some("success"))]),
    ]);
    let started = Instant::now();

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(waiting(), 10, None))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::Concluded(CheckSuiteConclusion::Success));
    assert_eq!(fetcher.calls(), 2);
    assert_elapsed(started, 10);
  }

  #[tokio::test(start_paused = true)]
  async fn test_polls_until_suites_complete() {
    let fetcher = ScriptedFetcher::new(vec![
      Step::Suites(vec![raw(1, "a", "queued", None), raw(2, "b", "in_progress", None)]),
      Step::Suites(vec![
        raw(1, "a", "in_progress", None),
        raw(2, "b", "completed", Some("success")),
      ]),
      Step::Suites(vec![
        raw(1, "a", "completed", Some("failure")),
        raw(2, "b", "completed", Some("success")),
      ]),
    ]);
    let started = Instant::now();

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(SuiteSelection::default(), 5, Some(60)))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::Concluded(CheckSuiteConclusion::Failure));
    assert_eq!(fetcher.calls(), 3);
    assert_elapsed(started, 10);
  }

  #[tokio::test(start_paused = true)]
  async fn test_timeout_stops_polling() {
    let fetcher = ScriptedFetcher::new(vec![Step::Suites(vec![raw(1, "a", "in_progress", None)])]);
    let started = Instant::now();

    let error = CheckSuitePoller::new(&fetcher)
      .run(&config(waiting(), 10, Some(5)))
      .await
      .unwrap_err();

    assert!(matches!(
      error,
      PollError::Timeout {
        timeout_seconds: 5,
        elapsed_seconds: 5
      }
    ));
    assert_elapsed(started, 5);
    assert_eq!(fetcher.calls(), 1);

    // Nothing keeps polling in the background once run has returned
    time::sleep(Duration::from_secs(60)).await;
    assert_eq!(fetcher.calls(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_timeout_interrupts_in_flight_fetch() {
    let error = CheckSuitePoller::new(HangingFetcher)
      .run(&config(waiting(), 10, Some(3)))
      .await
      .unwrap_err();

    assert!(matches!(error, PollError::Timeout { elapsed_seconds: 3, .. }));
  }

  #[tokio::test(start_paused = true)]
  async fn test_resolution_on_the_deadline_wins() {
    let fetcher = ScriptedFetcher::new(vec![
      Step::Suites(vec![raw(1, "a", "queued", None)]),
      Step::Suites(vec![raw(1, "a", "completed", Some("success"))]),
    ]);

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(SuiteSelection::default(), 10, Some(10)))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::Concluded(CheckSuiteConclusion::Success));
    assert_eq!(fetcher.calls(), 2);
  }

  #[tokio::test(start_paused = true)]
  async fn test_transport_error_aborts_run() {
    let fetcher = ScriptedFetcher::new(vec![
      Step::Suites(vec![raw(1, "a", "queued", None)]),
      Step::HttpStatus(500),
      Step::Suites(vec![raw(1, "a", "completed", Some("success"))]),
    ]);

    let error = CheckSuitePoller::new(&fetcher)
      .run(&config(SuiteSelection::default(), 10, None))
      .await
      .unwrap_err();

    match error {
      PollError::Transport(e) => assert_eq!(e.status_code(), Some(500)),
      other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(fetcher.calls(), 2);
  }

  #[tokio::test(start_paused = true)]
  async fn test_unknown_status_aborts_run() {
    let fetcher = ScriptedFetcher::new(vec![Step::Suites(vec![raw(1, "a", "requested", None)])]);

    let error = CheckSuitePoller::new(&fetcher)
      .run(&config(waiting(), 10, None))
      .await
      .unwrap_err();

    assert!(matches!(
      error,
      PollError::Consistency(ConsistencyError::UnknownStatus(ref s)) if s == "requested"
    ));
    assert_eq!(fetcher.calls(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_selection_is_applied_every_tick() {
    let fetcher = ScriptedFetcher::new(vec![
      Step::Suites(vec![raw(5, "other", "completed", Some("success"))]),
      Step::Suites(vec![
        raw(5, "other", "completed", Some("success")),
        raw(6, "lint-bot", "queued", None),
      ]),
      Step::Suites(vec![
        raw(5, "other", "completed", Some("success")),
        raw(6, "lint-bot", "completed", Some("failure")),
      ]),
    ]);
    let selection = SuiteSelection {
      app_slug_filter: Some("lint-bot".to_string()),
      wait_for_a_check_suite: true,
      ..Default::default()
    };

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(selection, 10, None))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::Concluded(CheckSuiteConclusion::Failure));
    assert_eq!(fetcher.calls(), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn test_own_check_suite_does_not_block() {
    let fetcher = ScriptedFetcher::new(vec![Step::Suites(vec![
      raw(41, "github-actions", "in_progress", None),
      raw(42, "circleci", "completed", Some("success")),
    ])]);
    let selection = SuiteSelection {
      wait_for_a_check_suite: true,
      exclude_check_suite_id: Some(41),
      ..Default::default()
    };

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(selection, 10, Some(30)))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::Concluded(CheckSuiteConclusion::Success));
    assert_eq!(fetcher.calls(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_only_own_check_suite_resolves_immediately() {
    let fetcher = ScriptedFetcher::new(vec![Step::Suites(vec![raw(41, "github-actions", "in_progress", None)])]);
    let selection = SuiteSelection {
      wait_for_a_check_suite: true,
      exclude_check_suite_id: Some(41),
      ..Default::default()
    };
    let started = Instant::now();

    let outcome = CheckSuitePoller::new(&fetcher)
      .run(&config(selection, 10, Some(600)))
      .await
      .unwrap();

    assert_eq!(outcome, PollOutcome::NoRelevantSuites);
    assert_eq!(fetcher.calls(), 1);
    assert_elapsed(started, 0);
  }

  #[test]
  fn test_round_seconds() {
    assert_eq!(round_seconds(Duration::from_millis(4_499)), 4);
    assert_eq!(round_seconds(Duration::from_millis(4_500)), 5);
    assert_eq!(round_seconds(Duration::from_secs(5)), 5);
  }
}
