//! Snapshot binary format constants and header read/write helpers.
//!
//! The header is always the **first 12 bytes** of a snapshot file:
//!
//! ```text
//! [magic: u32 LE = 0x534E_5031][version: u32 LE][body_crc: u32 LE]
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Result as IoResult, Write};

/// Magic number identifying snapshot files (ASCII "SNP1").
pub const SNAPSHOT_MAGIC: u32 = 0x534E_5031;

/// Current (and only) snapshot format version.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the header in bytes: 4 (`magic`) + 4 (`version`) + 4 (`body_crc`).
pub const HEADER_BYTES: u64 = 4 + 4 + 4;

/// Writes the snapshot header (`magic` + `version` + `body_crc`) to `w`.
pub fn write_header<W: Write>(w: &mut W, body_crc: u32) -> IoResult<()> {
    w.write_u32::<LittleEndian>(SNAPSHOT_MAGIC)?;
    w.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    w.write_u32::<LittleEndian>(body_crc)?;
    Ok(())
}

/// Reads the snapshot header from `r`, returning `(magic, version, body_crc)`.
///
/// No validation happens here; the caller checks the magic and version
/// against [`SNAPSHOT_MAGIC`] and [`FORMAT_VERSION`].
pub fn read_header<R: Read>(r: &mut R) -> IoResult<(u32, u32, u32)> {
    let magic = r.read_u32::<LittleEndian>()?;
    let version = r.read_u32::<LittleEndian>()?;
    let body_crc = r.read_u32::<LittleEndian>()?;
    Ok((magic, version, body_crc))
}
