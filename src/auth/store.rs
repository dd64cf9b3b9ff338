//! Credential store
//!
//! Persists session cookies as a small JSON file in the user's config
//! directory so the next run does not have to ask for them again.
//!
//! The fetch pipeline never touches this store; the CLI loads a context
//! from it and hands the result to the engine. Failures here are reported
//! as `false`/`None` and never abort a run.

use super::types::AuthContext;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name under the platform config dir
const APP_DIR: &str = "market-history";

/// Credentials file name
const FILE_NAME: &str = "credentials.json";

/// On-disk layout, keyed by the cookie names
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(rename = "sessionid")]
    session_id: String,
    #[serde(rename = "steamLoginSecure")]
    login_secure: String,
    #[serde(rename = "steamMachineAuth", default, skip_serializing_if = "Option::is_none")]
    machine_auth: Option<String>,
    #[serde(rename = "steamID", default, skip_serializing_if = "Option::is_none")]
    steam_id: Option<String>,
    #[serde(rename = "steamparental", default, skip_serializing_if = "Option::is_none")]
    parental: Option<String>,
    #[serde(rename = "savedAt", default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

impl From<&AuthContext> for StoredCredentials {
    fn from(ctx: &AuthContext) -> Self {
        Self {
            session_id: ctx.session_id().to_string(),
            login_secure: ctx.login_secure().to_string(),
            machine_auth: ctx.machine_auth().map(|m| m.token.clone()),
            steam_id: ctx.machine_auth().map(|m| m.steam_id.clone()),
            parental: ctx.parental().map(String::from),
            saved_at: Some(Utc::now()),
        }
    }
}

impl TryFrom<StoredCredentials> for AuthContext {
    type Error = Error;

    fn try_from(stored: StoredCredentials) -> Result<Self> {
        let mut builder = AuthContext::builder()
            .session_id(stored.session_id)
            .login_secure(stored.login_secure);
        if let Some(value) = stored.machine_auth {
            builder = builder.machine_auth(value);
        }
        if let Some(value) = stored.steam_id {
            builder = builder.steam_id(value);
        }
        if let Some(value) = stored.parental {
            builder = builder.parental(value);
        }
        builder.build()
    }
}

/// File-backed credential persistence
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store in `<config dir>/market-history/credentials.json`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine the user config directory"))?;
        Ok(Self::new(dir.join(APP_DIR).join(FILE_NAME)))
    }

    /// Path of the credentials file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a credentials file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load stored credentials, `None` if absent or unreadable
    pub fn load(&self) -> Option<AuthContext> {
        match self.try_load() {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring stored credentials");
                None
            }
        }
    }

    /// Save credentials, returning whether the write succeeded
    pub fn save(&self, ctx: &AuthContext) -> bool {
        match self.try_save(ctx) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to save credentials");
                false
            }
        }
    }

    /// Delete stored credentials, returning whether the store is now empty
    pub fn delete(&self) -> bool {
        match self.try_delete() {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to delete credentials");
                false
            }
        }
    }

    /// Load stored credentials, surfacing I/O and validation errors
    pub fn try_load(&self) -> Result<Option<AuthContext>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::persistence(format!("Failed to read credentials file: {e}")))?;
        let stored: StoredCredentials = serde_json::from_str(&contents)
            .map_err(|e| Error::persistence(format!("Failed to parse credentials file: {e}")))?;

        debug!(saved_at = ?stored.saved_at, "Loaded stored credentials");
        AuthContext::try_from(stored).map(Some)
    }

    /// Save credentials, surfacing I/O errors
    pub fn try_save(&self, ctx: &AuthContext) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::persistence(format!("Failed to create credentials directory: {e}"))
            })?;
        }

        let contents = serde_json::to_string_pretty(&StoredCredentials::from(ctx))
            .map_err(|e| Error::persistence(format!("Failed to serialize credentials: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        let written = write_private(&temp_path, contents.as_bytes())
            .map_err(|e| Error::persistence(format!("Failed to write credentials file: {e}")))
            .and_then(|()| {
                std::fs::rename(&temp_path, &self.path).map_err(|e| {
                    Error::persistence(format!("Failed to rename credentials file: {e}"))
                })
            });
        if written.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        written?;

        debug!(path = %self.path.display(), "Saved credentials");
        Ok(())
    }

    /// Delete stored credentials; a missing file is not an error
    pub fn try_delete(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::persistence(format!(
                "Failed to delete credentials file: {e}"
            ))),
        }
    }
}

/// Create (or truncate) `path` readable by the owner only, then write `contents`
///
/// On unix the mode is set when the file is created, so the secret is never
/// readable by others.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // An existing file keeps its old mode; tighten it as well
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()
}
