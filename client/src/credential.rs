use std::fs;
use std::path::PathBuf;

use common::error::{AppError, Res};

/// The operator's credential, the single piece of process-wide state on the
/// client side. Loaded once at startup, written on save, removed on logout.
/// Owned explicitly by whoever constructs it; there is no global.
pub struct CredentialStore {
    path: PathBuf,
    key: Option<String>,
}

impl CredentialStore {
    /// Loads the credential from `path`. A missing or empty file yields an
    /// empty store rather than an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        CredentialStore { path, key }
    }

    pub fn get(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Persists a new credential and keeps it in memory.
    pub fn set(&mut self, key: &str) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::Internal(format!("Failed to create credential directory: {}", err))
            })?;
        }
        fs::write(&self.path, key)
            .map_err(|err| AppError::Internal(format!("Failed to persist credential: {}", err)))?;
        self.key = Some(key.to_string());
        Ok(())
    }

    /// Logout: removes the persisted credential and forgets it.
    pub fn clear(&mut self) -> Res<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|err| {
                AppError::Internal(format!("Failed to remove credential: {}", err))
            })?;
        }
        self.key = None;
        Ok(())
    }

    /// Display form showing only the last six characters.
    pub fn masked(&self) -> Option<String> {
        self.key.as_ref().map(|key| {
            let tail: String = key
                .chars()
                .skip(key.chars().count().saturating_sub(6))
                .collect();
            format!("****{}", tail)
        })
    }
}
