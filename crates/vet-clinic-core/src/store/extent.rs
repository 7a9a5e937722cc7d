//! Generic extent: one durable collection per record type.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::file::{write_atomic, ExtentFile};
use super::{EntityId, Internal, Record, StoreError, StoreResult};

/// The persisted collection of every record of type `T`.
///
/// The map is the single authoritative view: lookups, membership checks and
/// reports all read it, and every mutation is written straight through to
/// the backing file (when there is one).
#[derive(Debug, Clone)]
pub struct Extent<T: Record> {
    records: BTreeMap<T::Id, T>,
    /// Highest identity ever handed out; survives removals.
    last_id: u64,
    path: Option<PathBuf>,
    pretty: bool,
}

impl<T: Record> Default for Extent<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<T: Record> Extent<T> {
    /// Create an extent that is never written to disk (for testing).
    pub fn in_memory() -> Self {
        Self {
            records: BTreeMap::new(),
            last_id: 0,
            path: None,
            pretty: false,
        }
    }

    /// Open the extent stored as `<dir>/<KIND>.json`, loading it if present.
    pub fn open<P: AsRef<Path>>(dir: P, pretty: bool) -> StoreResult<Self> {
        let path = dir.as_ref().join(format!("{}.json", T::KIND));
        let mut extent = Self {
            records: BTreeMap::new(),
            last_id: 0,
            path: Some(path),
            pretty,
        };
        extent.load()?;
        Ok(extent)
    }

    /// Replace the in-memory collection with the backing file's content.
    ///
    /// A missing file yields an empty extent. Malformed content is logged
    /// and also yields an empty extent; only real I/O failures are errors.
    pub fn load(&mut self) -> StoreResult<()> {
        self.records.clear();
        self.last_id = 0;

        let Some(path) = &self.path else {
            return Ok(());
        };

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{}: no backing file at {}", T::KIND, path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match ExtentFile::decode::<T>(&text) {
            Ok((records, last_id)) => {
                self.last_id = last_id;
                self.records = records.into_iter().map(|r| (r.id(), r)).collect();
                info!(
                    "{}: loaded {} records (last id {})",
                    T::KIND,
                    self.records.len(),
                    self.last_id
                );
            }
            Err(e) => {
                warn!(
                    "{}: discarding malformed backing file {}: {}",
                    T::KIND,
                    path.display(),
                    e
                );
            }
        }
        Ok(())
    }

    /// Rewrite the backing file with the full collection.
    pub fn save(&self) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = ExtentFile::build(self.records.values(), self.last_id)?;
        write_atomic(path, &file.encode(self.pretty)?)?;
        debug!("{}: saved {} records", T::KIND, self.records.len());
        Ok(())
    }

    /// Give `record` an identity if it has none.
    ///
    /// A caller-supplied identity is left untouched.
    pub fn assign_identity(&self, record: &mut T) -> T::Id {
        let id = record.id();
        if id.is_assigned() {
            return id;
        }
        let id = <T::Id as EntityId>::from_raw(self.last_id + 1);
        record.set_id(id);
        id
    }

    /// Store a new record and persist the extent.
    ///
    /// If the file cannot be written the record is dropped again, so the
    /// collection never runs ahead of its backing file.
    pub fn add(&mut self, mut record: T) -> StoreResult<T::Id> {
        let id = self.assign_identity(&mut record);
        if self.records.contains_key(&id) {
            return Err(StoreError::Duplicate(id.to_string()));
        }
        let previous_last = self.last_id;
        self.last_id = self.last_id.max(id.raw());
        self.records.insert(id, record);
        if let Err(e) = self.save() {
            self.records.remove(&id);
            self.last_id = previous_last;
            return Err(e);
        }
        Ok(id)
    }

    /// Drop a record and persist the extent. The record is kept if the
    /// file cannot be written.
    pub fn remove(&mut self, id: T::Id) -> StoreResult<T> {
        let record = self
            .records
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Err(e) = self.save() {
            self.records.insert(id, record);
            return Err(e);
        }
        Ok(record)
    }

    /// Apply an in-place edit and persist.
    ///
    /// The identity and association fields cannot be changed this way; they
    /// are restored after `edit` runs. A failed write restores the whole record.
    pub fn update<F>(&mut self, id: T::Id, edit: F) -> StoreResult<()>
    where
        F: FnOnce(&mut T),
    {
        let record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let before = record.clone();
        edit(record);
        record.set_id(id);
        record.keep_links(&before, Internal(()));

        if let Err(e) = self.save() {
            self.records.insert(id, before);
            return Err(e);
        }
        Ok(())
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.records.get_mut(&id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = T::Id> + '_ {
        self.records.keys().copied()
    }

    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
