//! # GitHub HTTP Client
//!
//! HTTP client implementation for GitHub API interactions, handling
//! authentication, request building, and response parsing for GitHub REST API
//! operations.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

use crate::consts::{ACCEPT, API_BASE_URL, API_VERSION, USER_AGENT};
use crate::error::GitHubError;
use crate::models::GitHubAuth;

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client
  pub fn new(auth: GitHubAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: API_BASE_URL.to_string(),
      auth,
    }
  }

  /// Point the client at a different API root, e.g. a GitHub Enterprise
  /// Server's `https://ghe.example.com/api/v3`
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  /// The API root requests are sent to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Build an endpoint URL below the API root. Each segment is percent-encoded,
  /// so refs containing `#`, `?` or `%` address the right resource.
  pub(crate) fn endpoint_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, GitHubError> {
    let invalid = |message: String| GitHubError::InvalidUrl {
      url: self.base_url.clone(),
      message,
    };
    let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
    url
      .path_segments_mut()
      .map_err(|()| invalid("cannot be a base URL".to_string()))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// Start a GET request with the headers every endpoint needs
  pub(crate) fn get(&self, url: &str) -> RequestBuilder {
    self
      .client
      .get(url)
      .header("Accept", ACCEPT)
      .header("User-Agent", USER_AGENT)
      .header("X-GitHub-Api-Version", API_VERSION)
      .bearer_auth(&self.auth.token)
  }

  /// Send a request and decode a JSON body, mapping non-success statuses to
  /// [`GitHubError::Status`]
  pub(crate) async fn send_json<T: DeserializeOwned>(&self, url: &str, request: RequestBuilder) -> Result<T, GitHubError> {
    let response = request.send().await?;
    let status = response.status();
    trace!(%url, status = status.as_u16(), "GitHub API response");

    if !status.is_success() {
      return Err(status_error(url, response).await);
    }

    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| GitHubError::Decode {
      url: url.to_string(),
      message: e.to_string(),
    })
  }
}

/// Build a [`GitHubError::Status`], preferring the `message` field GitHub puts
/// in error bodies over the raw body text
async fn status_error(url: &str, response: Response) -> GitHubError {
  let status = response.status().as_u16();
  let body = response.text().await.unwrap_or_default();

  let message = serde_json::from_str::<serde_json::Value>(&body)
    .ok()
    .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
    .unwrap_or(body);

  GitHubError::Status {
    url: url.to_string(),
    status,
    message,
  }
}

/// Create a GitHub client from an access token
pub fn create_github_client(token: &str) -> GitHubClient {
  let auth = GitHubAuth {
    token: token.to_string(),
  };

  GitHubClient::new(auth)
}
