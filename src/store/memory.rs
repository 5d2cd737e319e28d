//! In-memory blob store

use crate::store::BlobStore;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// An object held by [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct MemoryObject {
    /// Stored contents
    pub contents: Vec<u8>,
    /// Visibility marker the write carried, if any
    pub visibility: Option<String>,
}

/// Blob store that keeps objects in memory.
///
/// Useful in tests and demos. When constructed with a backend
/// allowlist, writes addressed to any other backend are declined,
/// which is how an unknown backend id surfaces at write time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    backends: Option<HashSet<String>>,
    objects: Mutex<HashMap<String, MemoryObject>>,
}

impl MemoryStore {
    /// Create a store that accepts writes on every backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that only accepts writes on the given backends
    pub fn with_backends<I, S>(backends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            backends: Some(backends.into_iter().map(Into::into).collect()),
            objects: Mutex::new(HashMap::new()),
        }
    }

    fn object_id(backend: &str, key: &str) -> String {
        format!("{}:{}", backend, key)
    }

    /// Fetch a stored object back, if present
    pub fn get(&self, backend: &str, key: &str) -> Option<MemoryObject> {
        self.objects
            .lock()
            .ok()?
            .get(&Self::object_id(backend, key))
            .cloned()
    }

    /// Number of objects currently stored
    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryStore {
    fn put(&self, backend: &str, key: &str, contents: &[u8], visibility: Option<&str>) -> bool {
        if let Some(backends) = &self.backends {
            if !backends.contains(backend) {
                log::warn!("unknown backend {}, write of {} declined", backend, key);
                return false;
            }
        }

        let Ok(mut objects) = self.objects.lock() else {
            return false;
        };

        objects.insert(
            Self::object_id(backend, key),
            MemoryObject {
                contents: contents.to_vec(),
                visibility: visibility.map(String::from),
            },
        );

        true
    }
}
