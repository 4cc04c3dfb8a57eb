//! API key resolution for interactive use.
//!
//! Sources are tried in order: the `BONDMCP_PUBLIC_API_KEY` environment
//! variable, the stored credential file (`~/.bondmcp_cli`), then a prompt.
//! A key obtained from the prompt is written back to the credential file.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{options::API_KEY_ENV, BondMcpError, Result};

/// File name of the stored credential, relative to the home directory.
pub const CREDENTIAL_FILE_NAME: &str = ".bondmcp_cli";

/// Where a resolved API key came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CredentialSource {
    Environment,
    StoredFile,
    Prompt,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub api_key: String,
    pub source: CredentialSource,
    /// Whether the key was written to the credential file during resolution.
    pub persisted: bool,
}

impl fmt::Debug for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedKey")
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .field("persisted", &self.persisted)
            .finish()
    }
}

/// Last-resort key source, usually a hidden terminal prompt.
pub trait KeyPrompt {
    fn prompt_api_key(&self) -> io::Result<String>;
}

impl<F> KeyPrompt for F
where
    F: Fn() -> io::Result<String>,
{
    fn prompt_api_key(&self) -> io::Result<String> {
        self()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(default)]
    api_key: Option<String>,
}

/// JSON credential file: `{"api_key": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.bondmcp_cli`, if a home directory can be determined.
    pub fn default_location() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(CREDENTIAL_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored key. A missing file is `Ok(None)`; malformed JSON is an error.
    pub fn load(&self) -> io::Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let stored: StoredCredential = serde_json::from_str(&content)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(stored.api_key.filter(|key| !key.trim().is_empty()))
    }

    /// Writes the key, readable by the owner only.
    pub fn save(&self, api_key: &str) -> io::Result<()> {
        let stored = StoredCredential {
            api_key: Some(api_key.to_owned()),
        };
        let content = serde_json::to_string(&stored).map_err(io::Error::other)?;
        write_private(&self.path, content.as_bytes())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

/// Ordered API key lookup: environment, stored file, prompt.
#[derive(Clone, Debug)]
pub struct CredentialResolver {
    env_key: Option<String>,
    store: Option<CredentialStore>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::from_environment()
    }
}

impl CredentialResolver {
    pub fn new(env_key: Option<String>, store: Option<CredentialStore>) -> Self {
        Self { env_key, store }
    }

    /// Snapshots `BONDMCP_PUBLIC_API_KEY` and uses the default credential file.
    pub fn from_environment() -> Self {
        Self::new(
            std::env::var(API_KEY_ENV).ok(),
            CredentialStore::default_location(),
        )
    }

    pub fn store(&self) -> Option<&CredentialStore> {
        self.store.as_ref()
    }

    /// Resolves a key, prompting only when no other source has one.
    ///
    /// Empty values count as absent. An unreadable credential file is skipped.
    /// Failing to persist a prompted key is logged and otherwise ignored.
    pub fn resolve<P: KeyPrompt + ?Sized>(&self, prompt: &P) -> Result<ResolvedKey> {
        if let Some(key) = non_empty(self.env_key.as_deref()) {
            return Ok(ResolvedKey {
                api_key: key,
                source: CredentialSource::Environment,
                persisted: false,
            });
        }

        if let Some(store) = &self.store {
            match store.load() {
                Ok(Some(key)) => {
                    return Ok(ResolvedKey {
                        api_key: key.trim().to_owned(),
                        source: CredentialSource::StoredFile,
                        persisted: false,
                    });
                }
                Ok(None) => {}
                Err(err) => warn_credential_file(store.path(), "ignoring unreadable", &err),
            }
        }

        let entered = prompt.prompt_api_key().map_err(|err| {
            BondMcpError::Configuration(format!("failed to read API key: {err}"))
        })?;
        let api_key = non_empty(Some(&entered)).ok_or_else(|| {
            BondMcpError::Configuration("no API key provided".to_owned())
        })?;

        let persisted = match &self.store {
            Some(store) => match store.save(&api_key) {
                Ok(()) => true,
                Err(err) => {
                    warn_credential_file(store.path(), "could not write", &err);
                    false
                }
            },
            None => false,
        };

        Ok(ResolvedKey {
            api_key,
            source: CredentialSource::Prompt,
            persisted,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn warn_credential_file(path: &Path, action: &str, err: &io::Error) {
    #[cfg(feature = "tracing")]
    tracing::warn!(path = %path.display(), error = %err, "{action} credential file");

    #[cfg(not(feature = "tracing"))]
    let _ = (path, action, err);
}
