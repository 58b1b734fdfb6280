//! # Check Suite Snapshot Fetcher
//!
//! The seam between the poller and the hosting platform. One call returns
//! every check suite currently attached to a ref; failures are returned as
//! [`GitHubError`] and never retried here.

use std::fmt;
use std::future::Future;

use suitegate_gh::{GitHubCheckSuite, GitHubClient, GitHubError};

/// The ref a poll watches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefTarget {
  pub owner: String,
  pub repo: String,
  pub git_ref: String,
}

impl fmt::Display for RefTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}@{}", self.owner, self.repo, self.git_ref)
  }
}

/// Source of check suite snapshots
pub trait CheckSuiteFetcher {
  /// Fetch every check suite currently attached to `target`
  fn fetch(&self, target: &RefTarget) -> impl Future<Output = Result<Vec<GitHubCheckSuite>, GitHubError>> + Send;
}

impl CheckSuiteFetcher for GitHubClient {
  fn fetch(&self, target: &RefTarget) -> impl Future<Output = Result<Vec<GitHubCheckSuite>, GitHubError>> + Send {
    self.list_check_suites_for_ref(&target.owner, &target.repo, &target.git_ref)
  }
}

#[cfg(test)]
mod tests {
  use suitegate_gh::create_github_client;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn target() -> RefTarget {
    RefTarget {
      owner: "octo".to_string(),
      repo: "hello".to_string(),
      git_ref: "main".to_string(),
    }
  }

  #[test]
  fn test_ref_target_display() {
    assert_eq!(target().to_string(), "octo/hello@main");
  }

  #[tokio::test]
  async fn test_github_client_fetches_snapshot() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_github_client("t").with_base_url(mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/repos/octo/hello/commits/main/check-suites"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "total_count": 1,
          "check_suites": [{
              "id": 11,
              "status": "queued",
              "conclusion": null,
              "app": { "slug": "github-actions" },
              "created_at": "2024-03-01T12:00:00Z"
          }]
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let suites = client.fetch(&target()).await?;
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0].id, 11);
    Ok(())
  }

  #[tokio::test]
  async fn test_github_client_surfaces_transport_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_github_client("t").with_base_url(mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/repos/octo/hello/commits/main/check-suites"))
      .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
      .mount(&mock_server)
      .await;

    let error = client.fetch(&target()).await.unwrap_err();
    assert_eq!(error.status_code(), Some(502));
    Ok(())
  }
}
