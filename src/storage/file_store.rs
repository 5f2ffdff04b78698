//! File Store
//!
//! One file per page under a single directory.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use super::PageStore;
use crate::error::{Result, WikiError};

/// Page file storage
///
/// ## Concurrency:
/// - Saves go to a fresh temp file and are renamed over the page, so a
///   reader sees either the old or the new body, never a mix
/// - Saves to the same title are serialized by one of `LOCK_STRIPES`
///   mutexes; different titles rarely contend
/// - Loads take no lock
/// - Concurrent saves to one title: last writer wins
pub struct FileStore {
    /// Directory holding the page files
    dir: PathBuf,

    /// Striped write locks, indexed by title hash
    write_locks: Vec<Mutex<()>>,
}

impl FileStore {
    const PAGE_EXTENSION: &'static str = "txt";
    const LOCK_STRIPES: usize = 64;

    /// Open or create a store in the given directory
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;

        let write_locks = (0..Self::LOCK_STRIPES).map(|_| Mutex::new(())).collect();

        Ok(Self {
            dir: dir.to_path_buf(),
            write_locks,
        })
    }

    /// Get the pages directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the page `title`: `{dir}/{title}.txt`
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", title, Self::PAGE_EXTENSION))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn write_lock(&self, title: &str) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        title.hash(&mut hasher);
        let stripe = (hasher.finish() % Self::LOCK_STRIPES as u64) as usize;
        &self.write_locks[stripe]
    }

    /// Write to a temp file in the same directory, then rename it into place
    fn write_atomic(&self, path: &Path, body: &[u8]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl PageStore for FileStore {
    fn load(&self, title: &str) -> Result<Bytes> {
        match fs::read(self.page_path(title)) {
            Ok(body) => Ok(Bytes::from(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(WikiError::PageNotFound(title.to_string()))
            }
            Err(e) => Err(WikiError::Io(e)),
        }
    }

    fn save(&self, title: &str, body: &[u8]) -> Result<()> {
        let path = self.page_path(title);
        let _guard = self.write_lock(title).lock();

        self.write_atomic(&path, body)
            .map_err(|source| WikiError::StorageWrite {
                title: title.to_string(),
                source,
            })?;

        tracing::trace!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }
}
