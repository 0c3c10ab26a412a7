use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::types::Credentials;

pub const CREDENTIALS_FILE: &str = "prefs.json";

pub fn default_path() -> Result<PathBuf> {
    Ok(crate::config::root_path()?.join(CREDENTIALS_FILE))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

/// Reads saved credentials. A missing, unreadable or malformed file counts
/// as nothing saved.
pub fn load(path: &Path) -> Option<Credentials> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("no saved credentials at {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Credentials>(&raw) {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            tracing::warn!("ignoring malformed credentials file {}: {}", path.display(), e);
            None
        }
    }
}

/// Writes the credentials as plain-text JSON.
pub fn save(path: &Path, credentials: &Credentials) -> Result<()> {
    let content = serde_json::to_string(credentials).context("Failed to serialize credentials")?;
    secure_write(path, &content)
        .with_context(|| format!("Failed to write credentials to {}", path.display()))
}

/// Deletes saved credentials. Returns whether a file was removed.
pub fn clear(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)
        .with_context(|| format!("Failed to remove {}", path.display()))?;
    Ok(true)
}
