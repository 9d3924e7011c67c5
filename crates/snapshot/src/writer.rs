use byteorder::{LittleEndian, WriteBytesExt};
use crc32fast::Hasher as Crc32;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::format::write_header;
use crate::value::{encode_key, encode_value};
use crate::{SnapshotError, Value};

/// Writes a complete mapping to disk as a snapshot file.
///
/// The writer is stateless — all work happens inside the single static
/// method [`write_map`](SnapshotWriter::write_map). Each call overwrites the
/// target file in full: the file is opened with create + truncate, the whole
/// encoded mapping is written in one pass, and the handle is closed before
/// returning. There is no append path and no partial write.
pub struct SnapshotWriter {}

impl SnapshotWriter {
    /// Replaces the contents of `path` with a snapshot of `map`.
    ///
    /// The body (entry count + entries) is encoded into memory first and
    /// checksummed, so a failed write leaves no half-encoded state behind in
    /// the caller; the file itself may be left truncated or partially
    /// written, which the next read reports as corrupt.
    ///
    /// Entries are encoded in ascending key order, so equal maps produce
    /// byte-identical files. An empty map is valid and produces a minimal
    /// well-formed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] if the file cannot be opened for
    /// writing or the write/sync does not complete.
    pub fn write_map(path: &Path, map: &BTreeMap<String, Value>) -> Result<(), SnapshotError> {
        // body: entry_count(u32), then key_len(u32) | key | value per entry,
        // in ascending key order
        let mut body = Vec::new();
        body.write_u32::<LittleEndian>(map.len() as u32)?;
        for (key, value) in map {
            encode_key(&mut body, key)?;
            encode_value(&mut body, value)?;
        }

        let mut hasher = Crc32::new();
        hasher.update(&body);
        let crc = hasher.finalize();

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        write_header(&mut file, crc)?;
        file.write_all(&body)?;
        file.flush()?;
        file.sync_all()?;

        Ok(())
    }
}
