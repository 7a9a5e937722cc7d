//! File-backed extent storage.
//!
//! Every entity type owns one [`Extent`]: the authoritative in-memory
//! collection of its records plus the JSON file it is mirrored to. The extent
//! assigns identities, and every `add`/`remove`/`update`/`save` rewrites the
//! whole file.

mod extent;
mod file;

pub use extent::*;
pub use file::{hash_data, CorruptFile, ExtentFile};

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Token for crate-internal access to association fields and mutable
/// extents. Only this crate can construct it.
#[derive(Debug, Clone, Copy)]
pub struct Internal(pub(crate) ());

/// Typed identity of a stored record.
///
/// Raw value 0 means "not assigned yet"; assigned identities start at 1.
pub trait EntityId:
    Copy + Ord + Eq + Hash + fmt::Debug + fmt::Display + Serialize + DeserializeOwned
{
    /// The record type this identity points at.
    type Entity: Record<Id = Self>;

    /// Lowercase name used in messages (e.g. "pet").
    const LABEL: &'static str;

    fn from_raw(raw: u64) -> Self;

    fn raw(self) -> u64;

    fn is_assigned(self) -> bool {
        self.raw() > 0
    }
}

/// A record that can live in an [`Extent`].
pub trait Record: Clone + fmt::Display + Serialize + DeserializeOwned {
    type Id: EntityId;

    /// Extent name, also used as the backing file stem.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Drop every association reference held by this record.
    #[doc(hidden)]
    fn clear_links(&mut self, access: Internal);

    /// Overwrite this record's association references with those of `from`.
    #[doc(hidden)]
    fn keep_links(&mut self, from: &Self, access: Internal);

    /// Pre-set the identity, e.g. when rebuilding records from another source.
    fn with_id(mut self, id: Self::Id) -> Self {
        self.set_id(id);
        self
    }
}
