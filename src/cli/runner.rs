//! CLI runner - executes one invocation

use crate::aggregate::AggregateResult;
use crate::auth::{AuthContext, CredentialStore};
use crate::cli::commands::Cli;
use crate::cli::progress::ProgressReporter;
use crate::cli::prompt::{confirm, prompt_credentials};
use crate::config::HistoryConfig;
use crate::engine::HistoryEngine;
use crate::error::Result;
use crate::output::{render_summary, render_transactions, top_transactions, write_export};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Where the session cookies for this run came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Stored,
    Prompted,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the invocation
    pub async fn run(&self) -> Result<()> {
        let store = self.credential_store()?;

        if self.cli.logout {
            return self.logout(&store);
        }

        let config = self.load_config()?;
        let stdin = io::stdin();
        let from_env = AuthContext::from_env()?;
        let (auth, source) =
            resolve_credentials(from_env, &store, &mut stdin.lock(), &mut io::stderr())?;
        debug!(?source, "Resolved credentials");

        let engine = HistoryEngine::new(&config, auth)?.with_progress(ProgressReporter::new());
        match engine.run().await {
            Ok(result) => self.report(&result),
            Err(e) if e.is_auth_failure() => {
                // The error itself is printed by the caller
                handle_rejected_session(&store, &mut stdin.lock(), &mut io::stderr())?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn credential_store(&self) -> Result<CredentialStore> {
        match &self.cli.credentials {
            Some(path) => Ok(CredentialStore::new(path)),
            None => CredentialStore::default_location(),
        }
    }

    fn load_config(&self) -> Result<HistoryConfig> {
        match &self.cli.config {
            Some(path) => HistoryConfig::from_file(path),
            None => Ok(HistoryConfig::default()),
        }
    }

    fn logout(&self, store: &CredentialStore) -> Result<()> {
        store.try_delete()?;
        println!("Removed stored credentials ({})", store.path().display());
        Ok(())
    }

    fn report(&self, result: &AggregateResult) -> Result<()> {
        println!("{}", render_summary(result));

        let top = top_transactions(result, self.cli.top as usize);
        if !top.is_empty() {
            println!();
            println!("Top {} transactions by price:", top.len());
            println!("{}", render_transactions(&top, result.currency_symbol()));
        }

        if let Some(path) = &self.cli.output {
            write_export(path, result)?;
            println!();
            println!("Exported {} transactions to {}", result.item_count(), path.display());
        }
        Ok(())
    }
}

/// Environment first, then the store, then an interactive prompt
///
/// Prompted credentials are saved; a failed save is reported, not fatal.
pub fn resolve_credentials<R: BufRead, W: Write>(
    from_env: Option<AuthContext>,
    store: &CredentialStore,
    input: &mut R,
    out: &mut W,
) -> Result<(AuthContext, CredentialSource)> {
    if let Some(ctx) = from_env {
        return Ok((ctx, CredentialSource::Environment));
    }

    if let Some(ctx) = store.load() {
        info!(path = %store.path().display(), "Using stored credentials");
        return Ok((ctx, CredentialSource::Stored));
    }

    let ctx = prompt_credentials(input, out)?;
    if store.save(&ctx) {
        writeln!(out, "Saved credentials to {}", store.path().display())?;
    } else {
        writeln!(out, "Could not save credentials; you will be asked again next time.")?;
    }
    Ok((ctx, CredentialSource::Prompted))
}

/// Tell the user how to recover from a rejected session
///
/// Offers to delete the stored credentials when there are any.
pub fn handle_rejected_session<R: BufRead, W: Write>(
    store: &CredentialStore,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    writeln!(out, "Log in to steamcommunity.com again and copy fresh cookies.")?;
    if !store.exists() {
        return Ok(false);
    }
    offer_logout(store, input, out)
}

/// Ask whether to forget the stored credentials after a rejected session
///
/// Returns whether they were deleted.
pub fn offer_logout<R: BufRead, W: Write>(
    store: &CredentialStore,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    if !confirm(input, out, "Delete the stored credentials?")? {
        return Ok(false);
    }
    let deleted = store.delete();
    if deleted {
        writeln!(out, "Stored credentials deleted.")?;
    }
    Ok(deleted)
}
