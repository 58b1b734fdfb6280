//! # suitegate CLI Entry Point
//!
//! Waits for the check suites of a commit and exits non-zero when they did
//! not succeed or when waiting failed.

use std::env;
use std::process::ExitCode;

use clap::Parser;
use suitegate_cli::cli::Cli;
use suitegate_cli::report::format_failure;
use suitegate_cli::{app, logging};
use suitegate_core::consts::ENV_GITHUB_ACTIONS;
use suitegate_core::print_error;

fn main() -> ExitCode {
  let cli = Cli::parse();

  logging::init_tracing(cli.verbose);
  cli.colors.apply();

  match app::run(&cli) {
    Ok(false) => ExitCode::SUCCESS,
    Ok(true) => ExitCode::FAILURE,
    Err(e) => {
      let in_github_actions = env::var(ENV_GITHUB_ACTIONS).is_ok_and(|value| value == "true");
      let message = format_failure(&e, in_github_actions);
      if in_github_actions {
        // Workflow commands are read from stdout
        println!("{message}");
      } else {
        print_error(&message);
      }
      ExitCode::FAILURE
    }
  }
}
