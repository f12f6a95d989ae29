//! Credential persisted in a private JSON file
//!
//! File layout: `{ "token": "<credential>" }`. On Unix the directory is
//! kept at mode 0700 and the file at 0600, and both must belong to the
//! effective user before a credential is read from them. The file is removed
//! on sign-out.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use partsdesk_core::session::{Credential, SessionStore};
use partsdesk_domain::constants::{SESSION_CREDENTIAL_KEY, SESSION_FILE_NAME};
use partsdesk_domain::{PartsDeskError, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::run_blocking;
use crate::errors::InfraError;

/// Session file inside a directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at `<dir>/session.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(SESSION_FILE_NAME) }
    }

    /// `$XDG_RUNTIME_DIR/partsdesk`, cleared when the login session ends.
    /// Without a runtime dir, a per-user directory under `$TMPDIR`.
    pub fn default_dir() -> PathBuf {
        dir_for(std::env::var_os("XDG_RUNTIME_DIR"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<Option<Credential>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };
        if let Some(dir) = path.parent() {
            ensure_owned(dir)?;
        }
        ensure_owned(path)?;

        let value: Value = serde_json::from_str(&contents).map_err(InfraError::from)?;
        match value.get(SESSION_CREDENTIAL_KEY).and_then(Value::as_str) {
            Some(token) if !token.trim().is_empty() => Credential::new(token).map(Some),
            _ => {
                warn!(path = %path.display(), "session file has no credential");
                Ok(None)
            }
        }
    }

    fn write(path: &Path, credential: &Credential) -> Result<()> {
        if let Some(dir) = path.parent() {
            prepare_dir(dir)?;
        }

        let mut body = Map::new();
        body.insert(SESSION_CREDENTIAL_KEY.to_string(), Value::from(credential.expose()));
        let contents = serde_json::to_vec(&Value::Object(body)).map_err(InfraError::from)?;

        let mut file = open_private(path).map_err(InfraError::from)?;
        file.write_all(&contents).map_err(InfraError::from)?;
        file.sync_all().map_err(InfraError::from)?;
        Ok(())
    }

    fn remove(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

fn dir_for(runtime_dir: Option<OsString>) -> PathBuf {
    match runtime_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join("partsdesk"),
        _ => std::env::temp_dir().join(per_user_dir_name()),
    }
}

#[cfg(unix)]
fn per_user_dir_name() -> String {
    format!("partsdesk-{}", current_uid())
}

#[cfg(not(unix))]
fn per_user_dir_name() -> String {
    "partsdesk".to_string()
}

#[cfg(unix)]
fn current_uid() -> u32 {
    // SAFETY: geteuid takes no arguments and always succeeds
    unsafe { libc::geteuid() }
}

/// Refuse paths planted by another user, and symlinks.
#[cfg(unix)]
fn ensure_owned(path: &Path) -> Result<()> {
    use std::os::unix::fs::MetadataExt;

    let meta = std::fs::symlink_metadata(path).map_err(InfraError::from)?;
    if meta.file_type().is_symlink() {
        return Err(PartsDeskError::Storage(format!(
            "refusing symlinked session path {}",
            path.display()
        )));
    }
    if meta.uid() != current_uid() {
        warn!(path = %path.display(), owner = meta.uid(), "session path owned by another user");
        return Err(PartsDeskError::Storage(format!(
            "session path {} is owned by another user",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_owned(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn prepare_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(InfraError::from)?;
    ensure_owned(dir)?;
    // a directory that already existed keeps its old mode otherwise
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))
        .map_err(InfraError::from)?;
    Ok(())
}

#[cfg(not(unix))]
fn prepare_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(InfraError::from)?;
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Credential>> {
        let path = self.path.clone();
        run_blocking("session file", move || Self::read(&path)).await
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let path = self.path.clone();
        let credential = credential.clone();
        run_blocking("session file", move || Self::write(&path, &credential)).await?;
        debug!(path = %self.path.display(), "session file written");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.path.clone();
        run_blocking("session file", move || Self::remove(&path)).await
    }
}
