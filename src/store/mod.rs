//! Blob stores
//!
//! This module provides the persistence port used by the uploader and
//! the bundled store implementations: a directory-backed store for
//! real use and an in-memory store for tests and demos.

pub mod disk;
pub mod memory;

pub use disk::{DiskStore, StoredObject};
pub use memory::{MemoryObject, MemoryStore};

/// Persistence port for named byte content.
///
/// A `false` return means the backend declined the write. That is a
/// recoverable condition the caller reads off the upload outcome, not
/// an error; implementations map their internal failures to `false`.
pub trait BlobStore {
    /// Write `contents` under `key` on the given backend
    fn put(&self, backend: &str, key: &str, contents: &[u8], visibility: Option<&str>) -> bool;
}
