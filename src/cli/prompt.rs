//! Interactive prompts
//!
//! Generic over the reader and writer so the flow can run against
//! in-memory buffers.

use crate::auth::{keys, AuthContext};
use crate::error::{Error, Result};
use std::io::{BufRead, Write};

/// Ask for the session cookies, one per line
///
/// The machine-auth token and parental cookie are optional; a blank answer
/// skips them. The Steam ID is only asked for when a machine-auth token
/// was given.
pub fn prompt_credentials<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<AuthContext> {
    writeln!(
        out,
        "Copy these cookies from a logged-in steamcommunity.com browser session."
    )?;

    let mut builder = AuthContext::builder()
        .session_id(ask(input, out, keys::SESSION_ID)?)
        .login_secure(ask(input, out, keys::LOGIN_SECURE)?);

    let machine_auth = ask(input, out, &format!("{} (optional)", keys::MACHINE_AUTH))?;
    if !machine_auth.is_empty() {
        builder = builder
            .machine_auth(machine_auth)
            .steam_id(ask(input, out, keys::STEAM_ID)?);
    }

    let parental = ask(input, out, &format!("{} (optional)", keys::PARENTAL))?;
    builder.parental(parental).build()
}

/// Yes/no question defaulting to no
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    let answer = ask(input, out, &format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::config(format!("No input for {label}")));
    }
    Ok(line.trim().to_string())
}
