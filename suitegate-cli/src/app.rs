//! # Wait Command
//!
//! Wires inputs, the GitHub client, the poller and reporting together.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use suitegate_core::consts::ENV_GITHUB_OUTPUT;
use suitegate_core::inputs::parse_boolean;
use suitegate_core::output::format_target;
use suitegate_core::{ActionsContext, CheckSuitePoller, ConfigError, RefTarget, print_info};
use suitegate_gh::{GitHubClient, create_github_client};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::report::report_outcome;

const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Run a full wait; returns whether the step should be marked failed
pub fn run(cli: &Cli) -> Result<bool> {
  let context = ActionsContext::from_env();
  let resolved = cli.inputs().resolve(&context)?;
  let fail_step_if_unsuccessful = parse_boolean("failStepIfUnsuccessful", &cli.fail_step_if_unsuccessful)?;

  let token = cli
    .token
    .clone()
    .filter(|token| !token.is_empty())
    .or_else(|| env::var(ENV_GITHUB_TOKEN).ok().filter(|token| !token.is_empty()))
    .ok_or(ConfigError::MissingInput("token"))?;
  let client = create_github_client(&token).with_base_url(&cli.api_url);
  debug!(api_url = client.base_url(), "Created GitHub client");

  let output_file = env::var(ENV_GITHUB_OUTPUT)
    .ok()
    .filter(|path| !path.is_empty())
    .map(PathBuf::from);

  let rt = Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt.block_on(async {
    let mut config = resolved.config;
    if let Some(run_id) = resolved.own_run_id {
      let own_suite = own_check_suite_id(&client, &config.target, run_id).await?;
      info!(run_id, check_suite_id = own_suite, "Ignoring this workflow run's own check suite");
      config.selection.exclude_check_suite_id = Some(own_suite);
    }

    print_info(&format!("Waiting for check suites on {}", format_target(&config.target)));
    CheckSuitePoller::new(client)
      .run(&config)
      .await
      .with_context(|| format!("Failed to wait for check suites on {}", config.target))
  })?;

  report_outcome(outcome, fail_step_if_unsuccessful, output_file.as_deref())
}

/// Look up the check suite the given workflow run belongs to
async fn own_check_suite_id(client: &GitHubClient, target: &RefTarget, run_id: u64) -> Result<u64> {
  let run = client
    .get_workflow_run(&target.owner, &target.repo, run_id)
    .await
    .with_context(|| format!("Failed to get workflow run {run_id} from {}/{}", target.owner, target.repo))?;

  Ok(run.check_suite_id().ok_or(ConfigError::MissingCheckSuite { run_id })?)
}
