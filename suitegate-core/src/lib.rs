//! # suitegate core
//!
//! Waits for the GitHub check suites on a commit to settle and reduces them to
//! one conclusion. The crate holds the typed check suite model, the per-tick
//! evaluation rules, the polling loop, and the validation of action inputs.

pub mod aggregate;
pub mod config;
pub mod consts;
pub mod fetcher;
pub mod inputs;
pub mod output;
pub mod poller;
pub mod suite;

pub use aggregate::{PendingReason, PollOutcome, SuiteSelection, TickVerdict, evaluate};
pub use config::{ConfigError, PollConfiguration};
pub use fetcher::{CheckSuiteFetcher, RefTarget};
pub use inputs::{ActionsContext, Inputs, ResolvedInputs};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use poller::{CheckSuitePoller, PollError};
pub use suite::{CheckSuite, CheckSuiteConclusion, CheckSuiteStatus, ConsistencyError, Snapshot, SuiteState};
