//! # Store — a persistent in-memory key-value map
//!
//! A mutable `String → Value` mapping backed by a single snapshot file on
//! durable storage. The whole map is loaded from disk at construction and
//! written back wholesale on every [`Store::flush`]; with autosync enabled,
//! every mutation flushes immediately.
//!
//! The store provides no locking and no cross-process coordination: two
//! stores opened on the same path race, and the last writer wins. Callers
//! that share a store across threads synchronize externally.

mod store;

pub use snapshot::{SnapshotError, Value};
pub use store::{Store, StoreError, DEFAULT_PATH};
