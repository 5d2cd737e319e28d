//! Directory-backed blob store

use crate::error::Result;
use crate::store::BlobStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata recorded next to each stored blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Backend the object was written on
    pub backend: String,
    /// Full storage key, including any folder prefix
    pub key: String,
    /// Size of the stored contents in bytes
    pub size: usize,
    /// Visibility marker the write carried, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// When the object was stored
    #[serde(rename = "storedAt")]
    pub stored_at: DateTime<Utc>,
}

/// Blob store that persists objects under a base directory.
///
/// Objects land at `<base>/<backend>/<key>`; intermediate folders are
/// created on demand. On unix the `public` and `private` visibility
/// markers map to file permissions (0o644 and 0o600); every marker is
/// also recorded in a JSON metadata sidecar next to the blob.
#[derive(Debug, Clone)]
pub struct DiskStore {
    base_path: PathBuf,
}

impl DiskStore {
    /// Create a new store rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn object_path(&self, backend: &str, key: &str) -> PathBuf {
        self.base_path.join(backend).join(key)
    }

    fn sidecar_path(&self, backend: &str, key: &str) -> PathBuf {
        let mut path = self.object_path(backend, key).into_os_string();
        path.push(".meta.json");
        PathBuf::from(path)
    }

    /// Read back the metadata sidecar for a stored object
    pub fn metadata(&self, backend: &str, key: &str) -> Result<StoredObject> {
        let raw = fs::read_to_string(self.sidecar_path(backend, key))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_object(
        &self,
        backend: &str,
        key: &str,
        contents: &[u8],
        visibility: Option<&str>,
    ) -> Result<()> {
        let path = self.object_path(backend, key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, contents)?;
        apply_visibility(&path, visibility)?;

        let stored = StoredObject {
            backend: backend.to_string(),
            key: key.to_string(),
            size: contents.len(),
            visibility: visibility.map(String::from),
            stored_at: Utc::now(),
        };

        let sidecar = serde_json::to_string_pretty(&stored)?;
        fs::write(self.sidecar_path(backend, key), sidecar)?;

        Ok(())
    }
}

impl BlobStore for DiskStore {
    fn put(&self, backend: &str, key: &str, contents: &[u8], visibility: Option<&str>) -> bool {
        match self.write_object(backend, key, contents, visibility) {
            Ok(()) => {
                log::debug!(
                    "stored {} on backend {} ({})",
                    key,
                    backend,
                    bytesize::ByteSize::b(contents.len() as u64)
                );
                true
            }
            Err(e) => {
                log::warn!("write of {} to backend {} rejected: {}", key, backend, e);
                false
            }
        }
    }
}

#[cfg(unix)]
fn apply_visibility(path: &Path, visibility: Option<&str>) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = match visibility {
        Some("public") => 0o644,
        Some("private") => 0o600,
        _ => return Ok(()),
    };

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_visibility(_path: &Path, _visibility: Option<&str>) -> std::io::Result<()> {
    Ok(())
}
