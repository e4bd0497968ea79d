//! Keyed multimap of index records, with persistence.
//!
//! Records are bucketed by index key. The store also remembers which keys
//! each source declaration wrote to, so re-indexing a declaration replaces its
//! old records instead of accumulating stale ones.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use std::io::{Cursor, Read, Write};
use tracing::{debug, trace, warn};

use super::data_type::RelationDataType;
use super::error::{IndexError, Result};
use super::indexer::IndexEntries;
use super::value::{IndexValue, reader_for};
use crate::base::QualifiedName;

/// Leading bytes of a persisted index.
pub const INDEX_MAGIC: [u8; 4] = *b"DGIX";

/// Bumped whenever the persisted layout or a record payload changes.
pub const INDEX_FORMAT_VERSION: u16 = 1;

/// The store contract the resolver reads from.
pub trait IndexStore {
    fn put(&mut self, key: &str, value: IndexValue);

    /// All records under `key`, empty when there are none.
    fn get(&self, key: &str) -> &[IndexValue];
}

/// Outcome of [`InMemoryIndexStore::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records whose payload could not be decoded.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryIndexStore {
    entries: FxHashMap<SmolStr, Vec<IndexValue>>,
    /// Source declaration → keys it has records under
    source_keys: FxHashMap<QualifiedName, FxHashSet<SmolStr>>,
}

impl IndexStore for InMemoryIndexStore {
    fn put(&mut self, key: &str, value: IndexValue) {
        self.source_keys
            .entry(value.source_fq_name().clone())
            .or_default()
            .insert(SmolStr::new(key));
        let values = self.entries.entry(SmolStr::new(key)).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    fn get(&self, key: &str) -> &[IndexValue] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record written by `source` with `entries`.
    pub fn replace_source(&mut self, source: &str, entries: IndexEntries) {
        self.remove_source(source);
        debug!(
            "[DAGGER_INDEX] re-indexed {}: {} records",
            source,
            entries.record_count()
        );
        for (key, values) in entries {
            for value in values {
                self.put(&key, value);
            }
        }
    }

    /// Remove every record written by `source`.
    pub fn remove_source(&mut self, source: &str) {
        let Some(keys) = self.source_keys.remove(source) else {
            return;
        };
        for key in keys {
            if let Some(values) = self.entries.get_mut(&key) {
                values.retain(|v| v.source_fq_name().as_ref() != source);
                if values.is_empty() {
                    self.entries.remove(&key);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.source_keys.clear();
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(SmolStr::as_str)
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Write the whole store. Keys are written in sorted order.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&INDEX_MAGIC)?;
        out.write_u16::<BigEndian>(INDEX_FORMAT_VERSION)?;

        let mut keys: Vec<&SmolStr> = self.entries.keys().collect();
        keys.sort();
        write_len(out, keys.len())?;

        let mut payload = Vec::new();
        for key in keys {
            write_str(out, key)?;
            let values = self.get(key);
            write_len(out, values.len())?;
            for value in values {
                payload.clear();
                value.save(&mut payload)?;
                out.write_u8(value.data_type().id())?;
                write_len(out, payload.len())?;
                out.write_all(&payload)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Read a store written by [`InMemoryIndexStore::save`].
    ///
    /// A record its reader rejects is skipped and counted; the rest of the
    /// stream still loads. A bad header or a truncated stream fails the
    /// whole load.
    pub fn load<R: Read>(input: &mut R) -> Result<(Self, LoadReport)> {
        let mut magic = [0u8; 4];
        input.read_exact(&mut magic)?;
        if magic != INDEX_MAGIC {
            return Err(IndexError::BadMagic { found: magic });
        }
        let version = input.read_u16::<BigEndian>()?;
        if version != INDEX_FORMAT_VERSION {
            return Err(IndexError::UnsupportedVersion {
                found: version,
                expected: INDEX_FORMAT_VERSION,
            });
        }

        let mut store = Self::new();
        let mut report = LoadReport::default();

        let key_count = input.read_u32::<BigEndian>()?;
        for _ in 0..key_count {
            let key = read_str(input)?;
            let record_count = input.read_u32::<BigEndian>()?;
            for _ in 0..record_count {
                let id = input.read_u8()?;
                let payload = read_bytes(input)?;
                match decode_record(id, &payload) {
                    Ok(value) => {
                        trace!(
                            "[DAGGER_INDEX] loaded '{}' -> {} ({})",
                            key,
                            value.source_fq_name(),
                            value.data_type()
                        );
                        store.put(&key, value);
                        report.loaded += 1;
                    }
                    Err(err) => {
                        warn!("[DAGGER_INDEX] skipping record under '{}': {}", key, err);
                        report.skipped += 1;
                    }
                }
            }
        }

        debug!(
            "[DAGGER_INDEX] loaded {} records ({} skipped) under {} keys",
            report.loaded,
            report.skipped,
            store.key_count()
        );
        Ok((store, report))
    }
}

fn decode_record(id: u8, payload: &[u8]) -> Result<IndexValue> {
    let data_type = RelationDataType::from_id(id).ok_or(IndexError::UnknownDataType(id))?;
    let mut cursor = Cursor::new(payload);
    let value = reader_for(data_type).read(&mut cursor)?;
    let consumed = cursor.position() as usize;
    if consumed != payload.len() {
        return Err(IndexError::TrailingBytes(payload.len() - consumed));
    }
    Ok(value)
}

fn write_len<W: Write>(out: &mut W, len: usize) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| {
        IndexError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "length does not fit in u32",
        ))
    })?;
    out.write_u32::<BigEndian>(len)?;
    Ok(())
}

fn write_str<W: Write>(out: &mut W, text: &str) -> Result<()> {
    write_len(out, text.len())?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn read_bytes<R: Read>(input: &mut R) -> Result<Vec<u8>> {
    let len = input.read_u32::<BigEndian>()? as usize;
    let mut bytes = Vec::new();
    input.take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(IndexError::truncated(len, bytes.len()));
    }
    Ok(bytes)
}

fn read_str<R: Read>(input: &mut R) -> Result<SmolStr> {
    let bytes = read_bytes(input)?;
    Ok(SmolStr::new(String::from_utf8(bytes)?))
}
