//! # Outcome Reporting
//!
//! Reports the final conclusion to the invoking workflow step: a log line, a
//! step output, and whether the step should fail.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use suitegate_core::consts::OUTPUT_CONCLUSION;
use suitegate_core::output::format_outcome;
use suitegate_core::{PollOutcome, print_error, print_success, print_warning};
use tracing::info;

/// Append `name=value` to a GitHub Actions step output file
pub fn write_step_output(path: &Path, name: &str, value: &str) -> Result<()> {
  let mut file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("Failed to open step output file {}", path.display()))?;
  writeln!(file, "{name}={value}").with_context(|| format!("Failed to write step output to {}", path.display()))?;
  Ok(())
}

/// Report the outcome; returns whether the step should be marked failed
pub fn report_outcome(outcome: PollOutcome, fail_step_if_unsuccessful: bool, output_file: Option<&Path>) -> Result<bool> {
  info!("Conclusion: {outcome}");
  let line = format!("Conclusion: {}", format_outcome(outcome));
  if outcome.is_success() {
    print_success(&line);
  } else {
    print_warning(&line);
  }

  if let Some(path) = output_file {
    write_step_output(path, OUTPUT_CONCLUSION, outcome.as_str())?;
  }

  let failed = fail_step_if_unsuccessful && !outcome.is_success();
  if failed {
    print_error("One or more of the check suites were unsuccessful.");
  }
  Ok(failed)
}

/// Render a fatal error, as a workflow error annotation when running inside
/// GitHub Actions
pub fn format_failure(error: &anyhow::Error, in_github_actions: bool) -> String {
  let message = format!("{error:#}");
  if in_github_actions {
    format!("::error::{}", escape_annotation(&message))
  } else {
    message
  }
}

/// Escape the characters workflow commands treat specially
fn escape_annotation(message: &str) -> String {
  message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
