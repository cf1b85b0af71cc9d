//! Directory-backed key-value store.
//!
//! Each key lives in its own file. Writes go to a temp file in the same
//! directory, are fsynced, then renamed over the entry, all while holding an
//! exclusive lock on a sibling `.lock` file. Readers never see a partial value.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gratia_core::error::{GratiaError, Result};
use gratia_core::storage::KeyValueStore;

use crate::paths::{is_entry_file, key_file_name};

/// File store rooted at a directory. Clones share the write journal.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
    /// Last value this process wrote per key (`None` = removed), so a poller
    /// can tell its own writes from another process's.
    own_writes: Arc<Mutex<HashMap<String, Option<String>>>>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            own_writes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key_file_name(key))
    }

    /// Journals `value` before it hits the disk, so a poll racing the write
    /// still sees it as ours. Returns the previous journal entry.
    fn remember_own_write(&self, key: &str, value: Option<&str>) -> Result<Option<Option<String>>> {
        let mut journal = self
            .own_writes
            .lock()
            .map_err(|_| GratiaError::persistence("file store journal lock poisoned"))?;
        Ok(journal.insert(key.to_string(), value.map(str::to_string)))
    }

    /// Puts back the journal entry replaced by a write that then failed.
    fn forget_failed_write(&self, key: &str, previous: Option<Option<String>>) {
        let Ok(mut journal) = self.own_writes.lock() else {
            return;
        };
        match previous {
            Some(value) => journal.insert(key.to_string(), value),
            None => journal.remove(key),
        };
    }

    /// True when `value` is exactly what this process last wrote under `key`.
    pub(crate) fn is_own_write(&self, key: &str, value: Option<&str>) -> bool {
        self.own_writes
            .lock()
            .ok()
            .and_then(|journal| journal.get(key).cloned())
            .is_some_and(|own| own.as_deref() == value)
    }

    /// Reads `key` synchronously; used by the poller.
    pub(crate) fn read_now(&self, key: &str) -> Result<Option<String>> {
        read_entry(&self.entry_path(key))
    }

    /// Number of entries currently on disk.
    pub fn entry_count(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let count = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| is_entry_file(&entry.path()))
            .count();
        Ok(count)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let previous = self.remember_own_write(key, Some(value))?;
        let path = self.entry_path(key);
        let owned = value.to_string();
        let written = tokio::task::spawn_blocking(move || write_atomic(&path, &owned))
            .await
            .map_err(|e| GratiaError::internal(format!("Failed to join task: {}", e)))
            .and_then(|result| {
                result.map_err(|e| GratiaError::persistence(format!("Failed to write {}: {}", key, e)))
            });
        if written.is_err() {
            self.forget_failed_write(key, previous);
        }
        written
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let previous = self.remember_own_write(key, None)?;
        let path = self.entry_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                self.forget_failed_write(key, previous);
                Err(GratiaError::persistence(format!(
                    "Failed to remove {}: {}",
                    key, err
                )))
            }
        }
    }
}

fn read_entry(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn write_atomic(path: &Path, value: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let _lock = FileLock::acquire(path)?;

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(value.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)
}

fn temp_path(path: &Path) -> std::io::Result<PathBuf> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no parent directory")
    })?;
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
    })?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// Exclusive lock on `<entry>.lock`, released when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> std::io::Result<Self> {
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()?;
        }

        Ok(FileLock { file })
    }
}
