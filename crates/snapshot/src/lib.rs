//! # Snapshot — whole-file map serialization
//!
//! The on-disk representation for the BrineKV store. A snapshot is a single
//! self-describing blob holding a complete `String → Value` mapping. Every
//! write replaces the whole file; every read consumes the whole file. There
//! is no append path and no partial update.
//!
//! ## File layout (v1)
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ HEADER (always first 12 bytes)                │
//! │                                               │
//! │ magic (u32 LE) "SNP1" | version (u32 LE)      │
//! │ body_crc (u32 LE)                             │
//! ├───────────────────────────────────────────────┤
//! │ BODY (CRC32-checked)                          │
//! │                                               │
//! │ entry_count (u32)                             │
//! │ key_len (u32) | key (UTF-8) | value           │
//! │                                               │
//! │ ... repeated for each entry ...               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Values are tagged: `0` Bool, `1` Int, `2` Str, `3` Bytes, `4` List,
//! `5` Map (see [`Value`]). All integers are little-endian. The magic value
//! `0x534E_5031` ("SNP1") identifies the format; the CRC covers the entire
//! body. A file that fails any structural check (wrong magic, unsupported
//! version, checksum mismatch, unknown tag, truncated or trailing bytes)
//! decodes to [`SnapshotError::Corrupt`] rather than to wrong data.

use std::io;

use thiserror::Error;

mod format;
mod reader;
mod value;
mod writer;

pub use format::{FORMAT_VERSION, HEADER_BYTES, SNAPSHOT_MAGIC};
pub use reader::SnapshotReader;
pub use value::Value;
pub use writer::SnapshotWriter;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt snapshot: {0}")]
    Corrupt(&'static str),
}
