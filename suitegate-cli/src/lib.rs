//! # suitegate CLI Library
//!
//! Argument parsing, logging setup, and outcome reporting for the `suitegate`
//! binary.

pub mod app;
pub mod cli;
pub mod logging;
pub mod report;
