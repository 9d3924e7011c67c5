use byteorder::{LittleEndian, ReadBytesExt};
use crc32fast::Hasher as Crc32;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::format::{FORMAT_VERSION, HEADER_BYTES, SNAPSHOT_MAGIC};
use crate::value::{decode_key, decode_value};
use crate::{SnapshotError, Value};

/// Reads a snapshot file back into a complete mapping.
///
/// Like the writer, the reader is stateless: [`read_map`](SnapshotReader::read_map)
/// opens the file, consumes it whole, and closes the handle before returning.
/// Validation is strict — the decoder accepts exactly the bytes the writer
/// produces and reports everything else as [`SnapshotError::Corrupt`].
pub struct SnapshotReader {}

impl SnapshotReader {
    /// Reads and decodes the snapshot at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] if the file cannot be opened or read,
    /// including when it does not exist (the caller decides whether that is
    /// an error), and [`SnapshotError::Corrupt`] if the contents fail
    /// validation.
    pub fn read_map(path: &Path) -> Result<BTreeMap<String, Value>, SnapshotError> {
        let mut f = File::open(path)?;
        let mut raw = Vec::new();
        f.read_to_end(&mut raw)?;
        Self::decode(&raw)
    }

    /// Decodes a snapshot blob.
    ///
    /// # Validation
    ///
    /// - The blob must be at least 12 bytes (header size).
    /// - The magic must equal `0x534E_5031` ("SNP1") and the version `1`.
    /// - The CRC32 of the body must match the header checksum.
    /// - The body must decode to exactly `entry_count` unique keys with no
    ///   bytes left over.
    pub fn decode(raw: &[u8]) -> Result<BTreeMap<String, Value>, SnapshotError> {
        if (raw.len() as u64) < HEADER_BYTES {
            return Err(SnapshotError::Corrupt("file too small for header"));
        }

        let mut header = &raw[..HEADER_BYTES as usize];
        let (magic, version, expected_crc) = crate::format::read_header(&mut header)?;
        if magic != SNAPSHOT_MAGIC {
            return Err(SnapshotError::Corrupt("bad magic"));
        }
        if version != FORMAT_VERSION {
            return Err(SnapshotError::Corrupt("unsupported format version"));
        }

        let body = &raw[HEADER_BYTES as usize..];
        let mut hasher = Crc32::new();
        hasher.update(body);
        if hasher.finalize() != expected_crc {
            return Err(SnapshotError::Corrupt("checksum mismatch"));
        }

        let mut input = body;
        let count = input
            .read_u32::<LittleEndian>()
            .map_err(|_| SnapshotError::Corrupt("truncated body"))?;

        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = decode_key(&mut input)?;
            let value = decode_value(&mut input)?;
            if map.insert(key, value).is_some() {
                return Err(SnapshotError::Corrupt("duplicate key"));
            }
        }

        if !input.is_empty() {
            return Err(SnapshotError::Corrupt("trailing bytes after map data"));
        }

        Ok(map)
    }
}
