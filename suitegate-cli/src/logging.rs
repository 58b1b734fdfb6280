//! Tracing setup for the `suitegate` binary

use std::env;

use suitegate_core::consts::ENV_RUNNER_DEBUG;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Map the `-v` count to a level. A workflow re-run with debug logging
/// enabled gets at least DEBUG.
pub fn level_for(verbose: u8, runner_debug: bool) -> Level {
  let level = match verbose {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  };

  if runner_debug && level < Level::DEBUG {
    Level::DEBUG
  } else {
    level
  }
}

/// Initialize the global tracing subscriber
pub fn init_tracing(verbose: u8) {
  let runner_debug = env::var(ENV_RUNNER_DEBUG).is_ok_and(|value| value == "1");
  let level = level_for(verbose, runner_debug);

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  tracing::debug!("Tracing initialized with level: {}", level);
}
