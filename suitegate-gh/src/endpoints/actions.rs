use tracing::instrument;

use crate::client::GitHubClient;
use crate::error::GitHubError;
use crate::models::GitHubWorkflowRun;

impl GitHubClient {
  /// Get a single GitHub Actions workflow run
  #[instrument(skip(self), level = "debug")]
  pub async fn get_workflow_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<GitHubWorkflowRun, GitHubError> {
    let run_id = run_id.to_string();
    let url = self
      .endpoint_url(["repos", owner, repo, "actions", "runs", run_id.as_str()])?
      .to_string();
    self.send_json(&url, self.get(&url)).await
  }
}
