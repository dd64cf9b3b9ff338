//! CLI module
//!
//! Command-line interface around the history engine.
//!
//! # Flow
//!
//! - `--logout` - forget stored credentials and exit
//! - otherwise: resolve credentials, fetch the whole history with a
//!   progress bar, print the summary and top transactions, and write the
//!   export when `--output` is given

mod commands;
mod progress;
mod prompt;
mod runner;

pub use commands::Cli;
pub use progress::ProgressReporter;
pub use prompt::{confirm, prompt_credentials};
pub use runner::{
    handle_rejected_session, offer_logout, resolve_credentials, CredentialSource, Runner,
};
