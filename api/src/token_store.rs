//! Token Store capability
//!
//! The access token and refresh token live behind this trait so the HTTP
//! client and the user container never touch storage directly. Both tokens
//! are written on login/registration, rotated on refresh and cleared
//! together on logout.
//!
//! # Implementations
//!
//! - [`MemoryTokenStore`]: process-local, used by tests and one-shot commands
//! - [`FileTokenStore`]: persists both tokens to a JSON file between runs

use crate::error::TokenStoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Storage for the access/refresh token pair
///
/// Writes are synchronous; they are called from reducers.
pub trait TokenStore: Send + Sync {
    /// Current access token, if any
    fn access_token(&self) -> Option<String>;

    /// Current refresh token, if any
    fn refresh_token(&self) -> Option<String>;

    /// Replace the access token
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Replace the refresh token
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Replace both tokens at once
    ///
    /// Either both tokens are stored or neither changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair cannot be persisted.
    fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), TokenStoreError>;

    /// Forget both tokens
    ///
    /// # Errors
    ///
    /// Returns an error if persisted tokens cannot be removed.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// The stored pair, also the on-disk format of [`FileTokenStore`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

fn lock(tokens: &Mutex<Tokens>) -> MutexGuard<'_, Tokens> {
    // Tokens are plain strings; a panic mid-write cannot leave them torn.
    tokens.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Tokens>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding both tokens
    #[must_use]
    pub fn with_tokens(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            tokens: Mutex::new(Tokens {
                access_token: Some(access_token.into()),
                refresh_token: Some(refresh_token.into()),
            }),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        lock(&self.tokens).access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        lock(&self.tokens).refresh_token.clone()
    }

    fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        lock(&self.tokens).access_token = Some(token.to_string());
        Ok(())
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError> {
        lock(&self.tokens).refresh_token = Some(token.to_string());
        Ok(())
    }

    fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), TokenStoreError> {
        *lock(&self.tokens) = Tokens {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
        };
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *lock(&self.tokens) = Tokens::default();
        Ok(())
    }
}

/// Token store backed by a JSON file
///
/// The file is read once on [`FileTokenStore::open`] and rewritten on every
/// change. A missing file means no tokens.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    tokens: Mutex<Tokens>,
}

impl FileTokenStore {
    /// Load tokens from `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();
        let tokens = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Tokens::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), "Opened token file");

        Ok(Self {
            path,
            tokens: Mutex::new(tokens),
        })
    }

    /// Location of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, apply: impl FnOnce(&mut Tokens)) -> Result<(), TokenStoreError> {
        let mut tokens = lock(&self.tokens);
        let mut next = tokens.clone();
        apply(&mut next);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&next)?)?;

        *tokens = next;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        lock(&self.tokens).access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        lock(&self.tokens).refresh_token.clone()
    }

    fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.update(|tokens| tokens.access_token = Some(token.to_string()))
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.update(|tokens| tokens.refresh_token = Some(token.to_string()))
    }

    fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), TokenStoreError> {
        self.update(|tokens| {
            tokens.access_token = Some(access_token.to_string());
            tokens.refresh_token = Some(refresh_token.to_string());
        })
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut tokens = lock(&self.tokens);
        match std::fs::remove_file(&self.path) {
            Ok(()) => {},
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => return Err(e.into()),
        }
        *tokens = Tokens::default();
        Ok(())
    }
}
