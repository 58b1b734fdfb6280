use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::consts::CHECK_SUITES_PER_PAGE;
use crate::error::GitHubError;
use crate::models::{CheckSuitesPage, GitHubCheckSuite};

impl GitHubClient {
  /// List every check suite attached to a ref, following pagination until
  /// `total_count` suites have been collected
  #[instrument(skip(self), level = "debug")]
  pub async fn list_check_suites_for_ref(
    &self,
    owner: &str,
    repo: &str,
    git_ref: &str,
  ) -> Result<Vec<GitHubCheckSuite>, GitHubError> {
    // A ref like `feature/x` keeps its slashes as separate path segments
    let segments = ["repos", owner, repo, "commits"]
      .into_iter()
      .chain(git_ref.split('/'))
      .chain(["check-suites"]);
    let url = self.endpoint_url(segments)?.to_string();

    let mut check_suites = Vec::new();
    let mut page = 1u32;
    loop {
      let request = self
        .get(&url)
        .query(&[("per_page", CHECK_SUITES_PER_PAGE), ("page", page)]);
      let body: CheckSuitesPage = self.send_json(&url, request).await?;

      let received = body.check_suites.len();
      check_suites.extend(body.check_suites);
      debug!(page, received, total_count = body.total_count, "Fetched check suites page");

      if received == 0 || check_suites.len() as u64 >= body.total_count {
        break;
      }
      page += 1;
    }

    Ok(check_suites)
  }
}
