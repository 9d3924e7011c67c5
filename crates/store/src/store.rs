use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snapshot::{SnapshotError, SnapshotReader, SnapshotWriter, Value};
use thiserror::Error;
use tracing::debug;

/// Backing file location used by [`Store::open_default`].
pub const DEFAULT_PATH: &str = "datastore";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup or deletion of a key that is not present. Expected in normal
    /// use; callers may catch it as an existence test.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
    /// The backing file exists and is non-empty but does not decode as a
    /// valid snapshot. Never retried or auto-repaired.
    #[error("corrupt store file: {0}")]
    CorruptStore(#[source] SnapshotError),
    /// The backing file could not be written, or could not be read when it
    /// was expected to be readable (a missing file is not an error).
    #[error("persistence failure: {0}")]
    Persistence(#[source] SnapshotError),
}

/// A key-value map mirrored to a single file on disk.
///
/// # Persistence model
///
/// The in-memory map is authoritative. [`load`](Store::load) replaces it
/// wholesale with the decoded backing file; [`flush`](Store::flush) replaces
/// the backing file wholesale with the encoded map. There are no partial
/// updates in either direction, no journal, and no append path — each flush
/// truncates and rewrites the entire file.
///
/// # Autosync
///
/// With `autosync` enabled every [`set`](Store::set) and
/// [`delete`](Store::delete) flushes synchronously before returning, so the
/// file always reflects the last mutation. Disabled, mutations accumulate in
/// memory until an explicit flush.
///
/// # Construction
///
/// [`open`](Store::open) loads the backing file before returning. A missing
/// or zero-length file is an empty store, not a failure; a non-empty file
/// that fails validation is [`StoreError::CorruptStore`].
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
    autosync: bool,
}

impl Store {
    /// Opens a store backed by the file at `path`, loading any existing
    /// snapshot found there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptStore`] if the backing file exists, is
    /// non-empty, and fails validation, or [`StoreError::Persistence`] if it
    /// exists but cannot be read.
    pub fn open<P: AsRef<Path>>(path: P, autosync: bool) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            entries: BTreeMap::new(),
            autosync,
        };
        store.load()?;
        Ok(store)
    }

    /// Opens a store backed by [`DEFAULT_PATH`] in the current directory.
    pub fn open_default(autosync: bool) -> Result<Self, StoreError> {
        Self::open(DEFAULT_PATH, autosync)
    }

    /// Replaces the in-memory map with the contents of the backing file.
    ///
    /// A missing or zero-length backing file leaves the map unchanged. This
    /// runs once automatically during [`open`](Store::open); calling it again
    /// later **discards every unflushed mutation** made since the last
    /// flush. It is a destructive reload, not a merge.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptStore`] if the file fails validation and
    /// [`StoreError::Persistence`] if it exists but cannot be read. The map
    /// is left as it was on any failure.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => {}
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StoreError::Persistence(SnapshotError::Io(e))),
        }

        let map = SnapshotReader::read_map(&self.path).map_err(classify_snapshot_error)?;
        debug!(
            "loaded {} entries from {}",
            map.len(),
            self.path.display()
        );
        self.entries = map;
        Ok(())
    }

    /// Inserts or overwrites the entry for `key`.
    ///
    /// # Errors
    ///
    /// The in-memory upsert itself cannot fail. With autosync enabled the
    /// store flushes before returning, and a flush failure propagates; the
    /// insert stays applied in memory either way.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), StoreError> {
        self.entries.insert(key.into(), value.into());
        if self.autosync {
            self.flush()?;
        }
        Ok(())
    }

    /// Returns the value stored under `key`.
    ///
    /// Presence is what counts, never the value itself: `Int(0)`, `Str("")`,
    /// `Bool(false)` and empty containers are returned as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] when no entry exists for `key`.
    pub fn get(&self, key: &str) -> Result<&Value, StoreError> {
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_owned()))
    }

    /// Removes the entry for `key`, returning the removed value.
    ///
    /// Uses the same presence test as [`get`](Store::get).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] when no entry exists for `key`.
    /// With autosync enabled the store flushes after the removal, and a
    /// flush failure propagates; the removal stays applied in memory.
    pub fn delete(&mut self, key: &str) -> Result<Value, StoreError> {
        let removed = self
            .entries
            .remove(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_owned()))?;
        if self.autosync {
            self.flush()?;
        }
        Ok(removed)
    }

    /// Writes the entire map to the backing file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the file cannot be opened for
    /// writing or the write does not complete. The in-memory map is never
    /// touched by a flush, successful or not; a failure only leaves the
    /// disk state stale.
    pub fn flush(&self) -> Result<(), StoreError> {
        SnapshotWriter::write_map(&self.path, &self.entries).map_err(StoreError::Persistence)?;
        debug!(
            "flushed {} entries to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns an iterator over all entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether autosync is enabled.
    pub fn autosync(&self) -> bool {
        self.autosync
    }

    /// Enables or disables autosync for subsequent mutations.
    pub fn set_autosync(&mut self, on: bool) {
        self.autosync = on;
    }
}

fn classify_snapshot_error(e: SnapshotError) -> StoreError {
    match e {
        SnapshotError::Corrupt(_) => StoreError::CorruptStore(e),
        SnapshotError::Io(_) => StoreError::Persistence(e),
    }
}
