use serde::Deserialize;
use url::Url;

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

/// The app that produced a check suite
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GitHubApp {
  pub slug: String,
}

/// Represents a GitHub check suite exactly as the API reports it.
///
/// `status` and `conclusion` are left as raw strings; turning them into typed
/// values is the consumer's job so unknown values surface in one place.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GitHubCheckSuite {
  pub id: u64,
  pub app: Option<GitHubApp>,
  pub status: String,
  pub conclusion: Option<String>,
  pub created_at: String,
}

impl GitHubCheckSuite {
  /// Slug of the producing app, or an empty string when GitHub omits the app
  pub fn app_slug(&self) -> &str {
    self.app.as_ref().map(|app| app.slug.as_str()).unwrap_or_default()
  }
}

/// One page of `GET /repos/{owner}/{repo}/commits/{ref}/check-suites`
#[derive(Debug, Deserialize)]
pub(crate) struct CheckSuitesPage {
  pub(crate) total_count: u64,
  pub(crate) check_suites: Vec<GitHubCheckSuite>,
}

/// Represents a GitHub Actions workflow run
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubWorkflowRun {
  pub check_suite_id: Option<u64>,
  pub check_suite_url: Option<String>,
}

impl GitHubWorkflowRun {
  /// The id of the check suite this run belongs to.
  ///
  /// Taken from the last path segment of `check_suite_url`, falling back to
  /// the `check_suite_id` field when the URL is absent.
  pub fn check_suite_id(&self) -> Option<u64> {
    match &self.check_suite_url {
      Some(url) => check_suite_id_from_url(url),
      None => self.check_suite_id,
    }
  }
}

/// Extract the numeric id from a check suite API URL such as
/// `https://api.github.com/repos/owner/repo/check-suites/467079434`
pub fn check_suite_id_from_url(check_suite_url: &str) -> Option<u64> {
  let url = Url::parse(check_suite_url).ok()?;
  let last = url.path_segments()?.filter(|segment| !segment.is_empty()).next_back()?;
  last.parse().ok()
}
