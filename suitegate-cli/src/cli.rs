//! # Command Line Interface
//!
//! Defines the `suitegate` arguments. Every input can also be supplied through
//! the `INPUT_*` environment variable GitHub Actions sets for action inputs.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use suitegate_core::consts::{DEFAULT_INTERVAL_SECONDS, ENV_GITHUB_API_URL};
use suitegate_core::{ColorMode, Inputs};
use suitegate_gh::consts::API_BASE_URL;

/// Top-level CLI command for suitegate
#[derive(Parser, Debug)]
#[command(name = "suitegate")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Wait for the GitHub check suites of a commit to finish")]
#[command(
  long_about = "Polls the check suites attached to a commit until every relevant suite has\n\
        completed, then reports the most severe conclusion among them.\n\n\
        Inputs may be given as flags or through the INPUT_* environment variables\n\
        GitHub Actions sets, so the binary can back a workflow step directly."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// GitHub token used to read check suites (falls back to $GITHUB_TOKEN)
  #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Repository to watch, as owner/repo (defaults to $GITHUB_REPOSITORY)
  #[arg(long, env = "INPUT_REPOSITORY")]
  pub repository: Option<String>,

  /// Ref whose check suites are watched (defaults to $GITHUB_SHA)
  #[arg(long = "ref", env = "INPUT_REF")]
  pub git_ref: Option<String>,

  /// Seconds between polls
  #[arg(long, env = "INPUT_INTERVALSECONDS", default_value = DEFAULT_INTERVAL_SECONDS)]
  pub interval_seconds: String,

  /// Give up after this many seconds; zero or negative waits forever
  #[arg(long, env = "INPUT_TIMEOUTSECONDS", allow_hyphen_values = true)]
  pub timeout_seconds: Option<String>,

  /// Only consider check suites created by the app with this slug
  #[arg(long, env = "INPUT_APPSLUGFILTER")]
  pub app_slug_filter: Option<String>,

  /// Keep waiting while no check suite exists instead of succeeding
  #[arg(long, env = "INPUT_WAITFORACHECKSUITE", default_value = "true")]
  pub wait_for_a_check_suite: String,

  /// Only consider the earliest created check suite
  #[arg(long, env = "INPUT_ONLYFIRSTCHECKSUITE", default_value = "false")]
  pub only_first_check_suite: String,

  /// Ignore the check suite of the workflow run executing suitegate
  #[arg(long, env = "INPUT_IGNOREOWNCHECKSUITE", default_value = "true")]
  pub ignore_own_check_suite: String,

  /// Exit non-zero when the conclusion is not success
  #[arg(long, env = "INPUT_FAILSTEPIFUNSUCCESSFUL", default_value = "true")]
  pub fail_step_if_unsuccessful: String,

  /// GitHub API root
  #[arg(long, env = ENV_GITHUB_API_URL, default_value = API_BASE_URL)]
  pub api_url: String,
}

impl Cli {
  /// The polling inputs, still unvalidated
  pub fn inputs(&self) -> Inputs {
    Inputs {
      repository: self.repository.clone(),
      git_ref: self.git_ref.clone(),
      interval_seconds: self.interval_seconds.clone(),
      timeout_seconds: self.timeout_seconds.clone(),
      app_slug_filter: self.app_slug_filter.clone(),
      wait_for_a_check_suite: self.wait_for_a_check_suite.clone(),
      only_first_check_suite: self.only_first_check_suite.clone(),
      ignore_own_check_suite: self.ignore_own_check_suite.clone(),
    }
  }
}
