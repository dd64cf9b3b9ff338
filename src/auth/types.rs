//! Auth context types
//!
//! An `AuthContext` is the validated set of Steam session cookies for one
//! run. It is built once and only read afterwards.

use crate::error::{Error, Result};
use reqwest::header::COOKIE;
use reqwest::RequestBuilder;
use std::fmt;

/// Cookie and credential key names, shared with the credential store
pub mod keys {
    pub const SESSION_ID: &str = "sessionid";
    pub const LOGIN_SECURE: &str = "steamLoginSecure";
    pub const MACHINE_AUTH: &str = "steamMachineAuth";
    pub const STEAM_ID: &str = "steamID";
    pub const PARENTAL: &str = "steamparental";
}

/// Environment variables consulted by [`AuthContext::from_env`]
pub mod env {
    pub const SESSION_ID: &str = "STEAM_SESSION_ID";
    pub const LOGIN_SECURE: &str = "STEAM_LOGIN_SECURE";
    pub const MACHINE_AUTH: &str = "STEAM_MACHINE_AUTH";
    pub const STEAM_ID: &str = "STEAM_ID";
    pub const PARENTAL: &str = "STEAM_PARENTAL";
}

/// Remembered-device cookie; only meaningful together with the account id
#[derive(Clone, PartialEq, Eq)]
pub struct MachineAuth {
    /// 64-bit account id, used as the cookie name suffix
    pub steam_id: String,
    /// Cookie value
    pub token: String,
}

/// Validated session credentials for the market endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    session_id: String,
    login_secure: String,
    machine_auth: Option<MachineAuth>,
    parental: Option<String>,
}

impl AuthContext {
    /// Create a context from the two required cookies
    pub fn new(session_id: impl Into<String>, login_secure: impl Into<String>) -> Result<Self> {
        Self::builder()
            .session_id(session_id)
            .login_secure(login_secure)
            .build()
    }

    /// Start building a context
    pub fn builder() -> AuthContextBuilder {
        AuthContextBuilder::default()
    }

    /// Build a context from `STEAM_*` environment variables
    ///
    /// Returns `Ok(None)` when neither required variable is set, so callers
    /// can fall through to other credential sources.
    pub fn from_env() -> Result<Option<Self>> {
        let var = |name: &str| std::env::var(name).ok();

        let session_id = var(env::SESSION_ID);
        let login_secure = var(env::LOGIN_SECURE);
        if session_id.is_none() && login_secure.is_none() {
            return Ok(None);
        }

        AuthContextBuilder {
            session_id,
            login_secure,
            machine_auth: var(env::MACHINE_AUTH),
            steam_id: var(env::STEAM_ID),
            parental: var(env::PARENTAL),
        }
        .build()
        .map(Some)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn login_secure(&self) -> &str {
        &self.login_secure
    }

    pub fn machine_auth(&self) -> Option<&MachineAuth> {
        self.machine_auth.as_ref()
    }

    pub fn parental(&self) -> Option<&str> {
        self.parental.as_deref()
    }

    /// Value for the `Cookie` request header
    ///
    /// Required cookies come first, then `steamparental`, then the
    /// per-account `steamMachineAuth<steamID>` cookie.
    pub fn cookie_header(&self) -> String {
        let mut parts = vec![
            format!("{}={}", keys::SESSION_ID, self.session_id),
            format!("{}={}", keys::LOGIN_SECURE, self.login_secure),
        ];

        if let Some(parental) = &self.parental {
            parts.push(format!("{}={}", keys::PARENTAL, parental));
        }

        if let Some(machine) = &self.machine_auth {
            parts.push(format!(
                "{}{}={}",
                keys::MACHINE_AUTH,
                machine.steam_id,
                machine.token
            ));
        }

        parts.join("; ")
    }

    /// Attach the session cookies to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(COOKIE, self.cookie_header())
    }
}

// Session cookies are secrets; keep them out of logs.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("session_id", &"<redacted>")
            .field("login_secure", &"<redacted>")
            .field(
                "steam_id",
                &self.machine_auth.as_ref().map(|m| m.steam_id.as_str()),
            )
            .field("has_parental", &self.parental.is_some())
            .finish()
    }
}

impl fmt::Debug for MachineAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineAuth")
            .field("steam_id", &self.steam_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builder for [`AuthContext`]
///
/// Optional fields given as empty or whitespace-only strings count as absent.
#[derive(Debug, Default, Clone)]
pub struct AuthContextBuilder {
    session_id: Option<String>,
    login_secure: Option<String>,
    machine_auth: Option<String>,
    steam_id: Option<String>,
    parental: Option<String>,
}

impl AuthContextBuilder {
    #[must_use]
    pub fn session_id(mut self, value: impl Into<String>) -> Self {
        self.session_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn login_secure(mut self, value: impl Into<String>) -> Self {
        self.login_secure = Some(value.into());
        self
    }

    #[must_use]
    pub fn machine_auth(mut self, value: impl Into<String>) -> Self {
        self.machine_auth = Some(value.into());
        self
    }

    #[must_use]
    pub fn steam_id(mut self, value: impl Into<String>) -> Self {
        self.steam_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn parental(mut self, value: impl Into<String>) -> Self {
        self.parental = Some(value.into());
        self
    }

    /// Validate and build the context
    pub fn build(self) -> Result<AuthContext> {
        let session_id =
            non_empty(self.session_id).ok_or_else(|| Error::missing_field(keys::SESSION_ID))?;
        let login_secure =
            non_empty(self.login_secure).ok_or_else(|| Error::missing_field(keys::LOGIN_SECURE))?;

        let machine_auth = match (non_empty(self.machine_auth), non_empty(self.steam_id)) {
            (Some(token), Some(steam_id)) => {
                if !steam_id.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::invalid_value(
                        keys::STEAM_ID,
                        "expected a numeric 64-bit account id",
                    ));
                }
                Some(MachineAuth { steam_id, token })
            }
            (None, None) => None,
            (Some(_), None) => {
                return Err(Error::invalid_value(
                    keys::MACHINE_AUTH,
                    format!("requires {} to be set as well", keys::STEAM_ID),
                ))
            }
            (None, Some(_)) => {
                return Err(Error::invalid_value(
                    keys::STEAM_ID,
                    format!("requires {} to be set as well", keys::MACHINE_AUTH),
                ))
            }
        };

        Ok(AuthContext {
            session_id,
            login_secure,
            machine_auth,
            parental: non_empty(self.parental),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
