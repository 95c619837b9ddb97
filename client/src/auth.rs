//! Session authentication and access token storage
//!
//! The backend issues a bearer token on login. The token is kept in a
//! [`TokenStore`] and attached to every request; there is no refresh flow.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

/// Where the access token lives between requests
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str) -> ClientResult<()>;

    fn clear(&self) -> ClientResult<()>;
}

/// Token held for the lifetime of the process only
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: &str) -> ClientResult<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

/// Token persisted to a file so a later run stays logged in
pub struct FileTokenStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl FileTokenStore {
    /// Open a token file; a missing or empty file means logged out
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let cached = match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.cached
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        *self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

/// Login state of the current session
#[derive(Clone)]
pub struct AuthState {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
}

impl AuthState {
    pub fn new(api: ApiClient) -> Self {
        let tokens = api.tokens().clone();
        Self { api, tokens }
    }

    /// Logged in means a token is present; it is never validated locally
    pub fn is_logged_in(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Log in and store the token. Failures are logged and reported as `false`.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.try_login(username, password).await {
            Ok(()) => {
                tracing::info!("Logged in as {}", username);
                true
            }
            Err(e) => {
                tracing::error!("Login failed for {}: {}", username, e);
                false
            }
        }
    }

    /// Log in, propagating the reason for a failure
    pub async fn try_login(&self, username: &str, password: &str) -> ClientResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::InvalidCredentials);
        }
        let token = self.api.login(username.trim(), password).await?;
        self.tokens.set(&token)
    }

    pub fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::error!("Failed to clear stored token: {}", e);
        }
        tracing::info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_token_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("agrimanage-{}-{}", name, std::process::id()))
            .join("token")
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);
        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let path = temp_token_path("persist");
        let store = FileTokenStore::open(&path).unwrap();
        assert_eq!(store.get(), None);

        store.set("token-123").unwrap();
        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.get().as_deref(), Some("token-123"));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(FileTokenStore::open(&path).unwrap().get(), None);
        // Clearing twice is fine
        reopened.clear().unwrap();
    }

    #[test]
    fn test_logged_in_follows_token() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let auth = AuthState::new(ApiClient::with_base_url("http://127.0.0.1:9", tokens.clone()));
        assert!(!auth.is_logged_in());

        tokens.set("t").unwrap();
        assert!(auth.is_logged_in());

        auth.logout();
        assert!(!auth.is_logged_in());
    }
}
