//! Environment variable management for testing
//!
//! Tests that read the GitHub Actions environment override variables through
//! [`EnvVarGuard`], which puts the original values back when dropped.

use std::env;

/// Overrides a set of environment variables for the lifetime of the guard
pub struct EnvVarGuard {
  /// Variable names with their values from before the override
  originals: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
  /// Set each `(name, Some(value))` and remove each `(name, None)`
  pub fn new(vars: &[(&str, Option<&str>)]) -> Self {
    let mut originals = Vec::with_capacity(vars.len());

    for (name, value) in vars {
      originals.push((name.to_string(), env::var(name).ok()));
      unsafe {
        match value {
          Some(value) => env::set_var(name, value),
          None => env::remove_var(name),
        }
      }
    }

    Self { originals }
  }

  /// Shorthand for setting variables only
  pub fn set(vars: &[(&str, &str)]) -> Self {
    let vars: Vec<(&str, Option<&str>)> = vars.iter().map(|(name, value)| (*name, Some(*value))).collect();
    Self::new(&vars)
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    for (name, original) in self.originals.iter().rev() {
      unsafe {
        match original {
          Some(value) => env::set_var(name, value),
          None => env::remove_var(name),
        }
      }
    }
  }
}
