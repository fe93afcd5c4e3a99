//! Bearer-token session storage.
//!
//! The session object is passed into [`crate::ApiClient`] explicitly
//! rather than living in ambient state, so tests and the CLI can run
//! against an in-memory session without touching the filesystem. Disk
//! persistence is a plain JSON file under the user config directory,
//! written with owner-only permissions.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

#[derive(Clone)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Load the session from the default location. A missing or
    /// unreadable file is simply the unauthenticated state.
    pub fn load() -> Self {
        match default_path() {
            Some(path) => Self::at_path(path),
            None => Self::in_memory(),
        }
    }

    /// Load from an explicit file path.
    pub fn at_path(path: PathBuf) -> Self {
        let token = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<SessionFile>(&raw).ok())
            .map(|file| file.token);

        if token.is_some() {
            log::debug!("[Session] loaded token from {}", path.display());
        }

        Self {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
        }
    }

    /// A session that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Store a token in memory and persist it when a path is configured.
    pub fn set_token(&self, token: String) {
        if let Some(path) = &self.path {
            if let Err(err) = persist(path, &token) {
                log::warn!("[Session] failed to persist session: {err}");
            }
        }
        *self.token.write() = Some(token);
    }

    /// Drop the in-memory token without touching the on-disk session.
    /// Used when the server answers 401: the stored session may still be
    /// valid for a fresh process after the operator re-authenticates.
    pub fn invalidate(&self) {
        log::info!("[Session] token invalidated");
        *self.token.write() = None;
    }

    /// Full logout: clear memory and remove the persisted file.
    pub fn clear(&self) {
        *self.token.write() = None;
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(err) = fs::remove_file(path) {
                    log::warn!("[Session] failed to remove session file: {err}");
                }
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("path", &self.path)
            .finish()
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kinodeck").join("session.json"))
}

fn persist(path: &PathBuf, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = SessionFile { token: token.to_string() };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
