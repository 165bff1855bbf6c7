//! Debounce Guard
//!
//! Cross-process, per-command-name mutual exclusion.
//!
//! ## Lock Files
//! ```text
//! {lock_dir}/
//!   ├── .togglepower_lock
//!   └── .volumeup_lock
//! ```
//!
//! Each debounced command takes an exclusive advisory lock on its own file
//! without waiting. A second process pressing the same button while the lock
//! is held gets `Debounced` instead of queuing, so only the first of a burst
//! reaches the display. Different names never contend.
//!
//! The files themselves stay behind after release: unlinking a locked file
//! lets a concurrent opener lock the orphaned inode while a third process
//! creates and locks a fresh one.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fs2::FileExt;

use crate::error::{Result, TvError};

/// Settle delay registered for one command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceSpec {
    pub settle: Duration,
}

impl DebounceSpec {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

/// A held lock; released when dropped
#[derive(Debug)]
pub struct CommandLock {
    file: File,
    path: PathBuf,
}

impl CommandLock {
    /// Lock file location for `name` under `dir`.
    ///
    /// ASCII letters, digits and `-` are kept; every other byte becomes `_`
    /// followed by two hex digits (`_` itself included), so distinct names
    /// always get distinct files.
    pub fn lock_path(dir: &Path, name: &str) -> PathBuf {
        let mut safe = String::with_capacity(name.len());
        for byte in name.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                safe.push(char::from(byte));
            } else {
                safe.push_str(&format!("_{:02x}", byte));
            }
        }
        dir.join(format!(".{}_lock", safe))
    }

    /// Take the lock for `name` or fail with `Debounced` if someone holds it
    pub fn try_acquire(dir: &Path, name: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let path = Self::lock_path(dir, name);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "lock acquired");
                Ok(Self { file, path })
            }
            Err(e) if is_contended(&e) => Err(TvError::Debounced(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CommandLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}

fn is_contended(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
