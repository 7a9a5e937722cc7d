//! On-disk envelope for an extent.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::{EntityId, Record, StoreResult};

/// Reasons a backing file is rejected as malformed.
#[derive(Error, Debug)]
pub enum CorruptFile {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file holds extent '{found}', expected '{expected}'")]
    KindMismatch { expected: String, found: String },

    #[error("checksum mismatch (stored {stored}, computed {computed})")]
    ChecksumMismatch { stored: String, computed: String },

    #[error("record without an identity")]
    UnassignedId,

    #[error("identity {0} appears more than once")]
    DuplicateId(u64),
}

/// Serialized form of one extent.
///
/// `records` is kept as a JSON value so the checksum is computed over the
/// same canonical encoding on save and on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtentFile {
    /// Extent name (matches [`Record::KIND`])
    pub kind: String,
    /// Time of the last full rewrite (RFC 3339)
    pub saved_at: String,
    /// Identity high-water mark
    pub last_id: u64,
    /// Hex SHA-256 of the canonical `records` encoding
    pub checksum: String,
    /// Every record of the extent, in identity order
    pub records: serde_json::Value,
}

impl ExtentFile {
    /// Build an envelope around the given records.
    pub fn build<'a, T, I>(records: I, last_id: u64) -> Result<Self, serde_json::Error>
    where
        T: Record + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let records: Vec<&T> = records.into_iter().collect();
        let records = serde_json::to_value(records)?;
        let checksum = checksum(&records)?;
        Ok(Self {
            kind: T::KIND.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
            last_id,
            checksum,
            records,
        })
    }

    /// Parse and verify an envelope, returning the decoded records.
    pub fn decode<T: Record>(text: &str) -> Result<(Vec<T>, u64), CorruptFile> {
        let file: ExtentFile = serde_json::from_str(text)?;

        if file.kind != T::KIND {
            return Err(CorruptFile::KindMismatch {
                expected: T::KIND.to_string(),
                found: file.kind,
            });
        }

        let computed = checksum(&file.records)?;
        if computed != file.checksum {
            return Err(CorruptFile::ChecksumMismatch {
                stored: file.checksum,
                computed,
            });
        }

        let records: Vec<T> = serde_json::from_value(file.records)?;
        let mut seen = std::collections::BTreeSet::new();
        for record in &records {
            let id = record.id();
            if !id.is_assigned() {
                return Err(CorruptFile::UnassignedId);
            }
            if !seen.insert(id.raw()) {
                return Err(CorruptFile::DuplicateId(id.raw()));
            }
        }

        let high_water = seen.iter().next_back().copied().unwrap_or(0);
        Ok((records, file.last_id.max(high_water)))
    }

    /// Encode for writing.
    pub fn encode(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Compute the hex SHA-256 of some bytes.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn checksum(records: &serde_json::Value) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(records)?;
    Ok(hash_data(&canonical))
}

/// Replace `path` with `content` via a temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, content: &str) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Specie, SpecieId};

    fn specie(id: u64, name: &str) -> Specie {
        Specie::new(name.into(), format!("{} description", name)).with_id(SpecieId(id))
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_data(b"abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_build_and_decode() {
        let records = vec![specie(1, "Dog"), specie(2, "Cat")];
        let file = ExtentFile::build(records.iter(), 2).unwrap();
        let text = file.encode(true).unwrap();

        let (decoded, last_id): (Vec<Specie>, u64) = ExtentFile::decode(&text).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].name, "Cat");
        assert_eq!(last_id, 2);
    }

    #[test]
    fn test_high_water_mark_never_below_max_id() {
        let records = vec![specie(7, "Dog")];
        let file = ExtentFile::build(records.iter(), 3).unwrap();
        let text = file.encode(false).unwrap();

        let (_, last_id) = ExtentFile::decode::<Specie>(&text).unwrap();
        assert_eq!(last_id, 7);
    }

    #[test]
    fn test_tampered_records_fail_checksum() {
        let records = vec![specie(1, "Dog")];
        let file = ExtentFile::build(records.iter(), 1).unwrap();
        let text = file.encode(false).unwrap().replace("Dog", "Wolf");

        let err = ExtentFile::decode::<Specie>(&text).unwrap_err();
        assert!(matches!(err, CorruptFile::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let records = vec![specie(1, "Dog")];
        let mut file = ExtentFile::build(records.iter(), 1).unwrap();
        file.kind = "pets".into();
        let text = file.encode(false).unwrap();

        let err = ExtentFile::decode::<Specie>(&text).unwrap_err();
        assert!(matches!(err, CorruptFile::KindMismatch { .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records = vec![specie(1, "Dog"), specie(1, "Cat")];
        let file = ExtentFile::build(records.iter(), 1).unwrap();
        let text = file.encode(false).unwrap();

        let err = ExtentFile::decode::<Specie>(&text).unwrap_err();
        assert!(matches!(err, CorruptFile::DuplicateId(1)));
    }

    #[test]
    fn test_garbage_is_json_error() {
        let err = ExtentFile::decode::<Specie>("not json at all").unwrap_err();
        assert!(matches!(err, CorruptFile::Json(_)));
    }
}
