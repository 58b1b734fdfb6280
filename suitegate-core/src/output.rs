//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use owo_colors::{OwoColorize, Stream, Style};
use {clap, emojis};

use crate::aggregate::PollOutcome;
use crate::fetcher::RefTarget;
use crate::suite::CheckSuiteConclusion;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Set the global color override; `Auto` leaves terminal detection alone.
  /// Only output rendered through [`paint`] honors it.
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Apply `style` when the stream takes colors under the current [`ColorMode`]
pub fn paint(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |text| text.style(style)).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", paint(&check, Stream::Stdout, Style::new().green().bold()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", paint(&cross, Stream::Stderr, Style::new().red().bold()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", paint(&warning, Stream::Stdout, Style::new().yellow().bold()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", paint(&info, Stream::Stdout, Style::new().blue().bold()), message);
}

/// Format the ref being watched
pub fn format_target(target: &RefTarget) -> String {
  paint(&target.to_string(), Stream::Stdout, Style::new().bright_cyan().bold())
}

/// Format a poll outcome, colored by severity
pub fn format_outcome(outcome: PollOutcome) -> String {
  let style = match outcome {
    PollOutcome::NoRelevantSuites | PollOutcome::Concluded(CheckSuiteConclusion::Success) => Style::new().green(),
    PollOutcome::Concluded(CheckSuiteConclusion::Neutral) => Style::new().bright_black(),
    PollOutcome::Concluded(CheckSuiteConclusion::Cancelled | CheckSuiteConclusion::ActionRequired) => {
      Style::new().yellow()
    }
    PollOutcome::Concluded(CheckSuiteConclusion::Failure | CheckSuiteConclusion::TimedOut) => Style::new().red(),
  };
  paint(outcome.as_str(), Stream::Stdout, style)
}
