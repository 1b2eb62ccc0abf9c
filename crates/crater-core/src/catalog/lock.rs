use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::consts::CATALOG_LOCK_SUFFIX;
use crate::error::{CraterError, Result};

/// Exclusive sidecar lock (`<catalog>.lock`) held for a load-append-write
/// cycle. Released when dropped.
#[derive(Debug)]
pub struct CatalogLock {
    path: PathBuf,
}

impl CatalogLock {
    pub fn acquire(catalog_path: &Path) -> Result<Self> {
        let path = lock_path(catalog_path);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(CraterError::CatalogLocked {
                    path: catalog_path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        // Owned from here on, so a failed write still removes the file.
        let lock = Self { path };
        // Owner pid helps when clearing a stale lock by hand.
        writeln!(file, "{}", std::process::id())?;
        debug!(lock = %lock.path.display(), "catalog lock acquired");
        Ok(lock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CatalogLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "failed to release catalog lock");
        }
    }
}

pub fn lock_path(catalog_path: &Path) -> PathBuf {
    let mut name = catalog_path.as_os_str().to_owned();
    name.push(CATALOG_LOCK_SUFFIX);
    PathBuf::from(name)
}
