//! # token — access token custody
//!
//! The token is a bare string in its own file: present or absent, nothing
//! else. No expiry tracking and no refresh; a token that fails verification
//! or an upload is simply dropped.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use url::Url;

use crate::error::{DeskError, Result};

#[derive(Debug, Default)]
pub struct TokenStore {
    path:  Option<PathBuf>,
    token: Option<String>,
}

impl TokenStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => Some(raw.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "access token unreadable, ignoring");
                None
            }
        };
        Self { path: Some(path), token }
    }

    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set(&mut self, token: String) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            write_private(path, &token)?;
        }
        self.token = Some(token);
        info!("🔑 access token stored");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        info!("access token cleared");
        Ok(())
    }
}

/// Write `contents` readable by the owner only (0600 on unix), tightening an
/// existing file's mode too.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        if path.exists() {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
    }
    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

/// Pull the token out of what the user pasted after consenting.
///
/// Accepts the full `…/auth-callback?access_token=…` URL the backend
/// redirected to (an `error=…` marker there becomes `ExchangeFailed`), or the
/// bare token itself.
pub fn token_from_callback(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DeskError::InvalidInput("nothing to read a token from".into()));
    }

    let url = match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => return Ok(input.to_string()),
    };

    let mut token = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(DeskError::ExchangeFailed(value.into_owned())),
            "access_token" if !value.is_empty() => token = Some(value.into_owned()),
            _ => {}
        }
    }
    token.ok_or_else(|| DeskError::InvalidInput("callback URL carries no access_token".into()))
}
