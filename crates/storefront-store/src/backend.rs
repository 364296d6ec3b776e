// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use storefront_core::sha256_hex;
use storefront_model::Catalog;
use tracing::{debug, info};

use crate::codec::{parse_catalog, parse_previous_catalog, serialize_catalog};
use crate::paths::{lock_path_for, parent_dir, tmp_path_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Conflict,
    Io,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::Io => "io_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Where a Catalog Store lives.
///
/// Only the sync pipeline publishes; readers call [`CatalogStore::load`].
pub trait CatalogStore {
    /// Loads and validates the current store; `Ok(None)` when none exists yet.
    fn load(&self) -> Result<Option<Catalog>, StoreError>;

    /// Loads the current store as sync input, tolerating hand edits that
    /// the next publish overwrites anyway; `Ok(None)` when none exists yet.
    fn load_previous(&self) -> Result<Option<Catalog>, StoreError>;

    /// Replaces the store with `bytes` in one step.
    fn publish(&self, bytes: &[u8], expected_sha256: &str) -> Result<(), StoreError>;

    fn acquire_publish_lock(&self) -> Result<PublishLockGuard, StoreError>;
}

/// Serializes `catalog` and publishes it, returning the written digest.
pub fn publish_catalog<S: CatalogStore + ?Sized>(
    store: &S,
    catalog: &Catalog,
    generated_at: &str,
) -> Result<String, StoreError> {
    catalog
        .validate()
        .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
    let bytes = serialize_catalog(catalog, generated_at)?;
    let digest = sha256_hex(&bytes);
    store.publish(&bytes, &digest)?;
    Ok(digest)
}

pub struct PublishLockGuard {
    lock_path: PathBuf,
}

impl PublishLockGuard {
    fn new(lock_path: PathBuf) -> Self {
        Self { lock_path }
    }
}

impl Drop for PublishLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// A Catalog Store file on the local filesystem.
pub struct LocalFsStore {
    pub path: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_existing(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no previous catalog store");
                Ok(None)
            }
            Err(e) => Err(StoreError::new(StoreErrorCode::Io, e.to_string())),
        }
    }
}

impl CatalogStore for LocalFsStore {
    fn load(&self) -> Result<Option<Catalog>, StoreError> {
        let Some(raw) = self.read_existing()? else {
            return Ok(None);
        };
        let catalog = parse_catalog(&raw)?;
        catalog
            .validate()
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        Ok(Some(catalog))
    }

    fn load_previous(&self) -> Result<Option<Catalog>, StoreError> {
        self.read_existing()?
            .map(|raw| parse_previous_catalog(&raw))
            .transpose()
    }

    fn publish(&self, bytes: &[u8], expected_sha256: &str) -> Result<(), StoreError> {
        let _guard = self.acquire_publish_lock()?;
        let tmp = tmp_path_for(&self.path);

        let staged = write_and_sync(&tmp, bytes).and_then(|()| {
            let on_disk =
                fs::read(&tmp).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
            let actual = sha256_hex(&on_disk);
            if actual != expected_sha256 {
                return Err(StoreError::new(
                    StoreErrorCode::Validation,
                    format!("sha256 mismatch expected={expected_sha256} actual={actual}"),
                ));
            }
            Ok(())
        });
        if let Err(err) = staged {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::new(StoreErrorCode::Io, e.to_string()));
        }
        sync_dir(&parent_dir(&self.path))?;
        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            sha256 = expected_sha256,
            "catalog store published"
        );
        Ok(())
    }

    fn acquire_publish_lock(&self) -> Result<PublishLockGuard, StoreError> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(&dir).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        let lock_path = lock_path_for(&self.path);
        match OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&lock_path)
        {
            Ok(_) => Ok(PublishLockGuard::new(lock_path)),
            Err(e) => Err(StoreError::new(
                StoreErrorCode::Conflict,
                format!(
                    "failed to acquire publish lock {}: {e}",
                    lock_path.display()
                ),
            )),
        }
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut f = File::create(path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    f.write_all(bytes)
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    f.sync_all()
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), StoreError> {
    let f = OpenOptions::new()
        .read(true)
        .open(dir)
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    f.sync_all()
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), StoreError> {
    Ok(())
}
