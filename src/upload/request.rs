//! Upload request configuration
//!
//! This module contains the fluent request builder and the outcome type
//! the uploader returns.

use crate::error::{Result, UploadError};
use crate::upload::filename::generate_unique_name;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Backend used when a request never named one
pub const DEFAULT_BACKEND: &str = "local";

/// Prefix of the backend-selection calls understood by [`UploadRequest::apply`]
const UPLOAD_TO_PREFIX: &str = "uploadTo";

/// Canonical identifiers for well-known backend aliases
static KNOWN_BACKENDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Local", "local"),
        ("Public", "public"),
        ("S3", "s3"),
        ("Ftp", "ftp"),
        ("Sftp", "sftp"),
        ("Rackspace", "rackspace"),
    ])
});

/// Fluent configuration for a single upload.
///
/// Each setter consumes the request and returns it, so configuration
/// chains. The request is read once per upload call; nothing in it is
/// cached between calls.
#[derive(Clone, Default)]
pub struct UploadRequest {
    /// Destination backend id; [`DEFAULT_BACKEND`] when unset
    pub backend: Option<String>,
    /// Folder prefix of the storage key, stored verbatim
    pub folder: String,
    /// Desired filename without extension; generated when unset
    pub filename: Option<String>,
    /// Opaque visibility marker passed through to the blob store
    pub visibility: Option<String>,
    /// Callback run with the resolved key after a successful upload
    pub on_success: Option<Arc<dyn Fn(&str) + Send + Sync>>,
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("backend", &self.backend)
            .field("folder", &self.folder)
            .field("filename", &self.filename)
            .field("visibility", &self.visibility)
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}

impl UploadRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the backend where the file will be uploaded
    pub fn upload_to(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Specify the folder where the file will be stored
    pub fn to_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Rename the uploaded file to the given name, without extension
    pub fn rename_to(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the visibility of the file
    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    /// Run a callback with the resolved key after a successful upload
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Interpret a configuration call given by name.
    ///
    /// A name of the shape `uploadTo<Backend>` selects a backend:
    /// well-known aliases resolve through a lookup table, anything else
    /// through the snake_case convention (`uploadToLocalDisk` selects
    /// `local_disk`). Every other name fails with an unsupported-call
    /// error naming the method.
    pub fn apply(self, method: &str) -> Result<Self> {
        match method.strip_prefix(UPLOAD_TO_PREFIX) {
            Some(name) if !name.is_empty() => {
                let backend = KNOWN_BACKENDS
                    .get(name)
                    .map(|canonical| (*canonical).to_string())
                    .unwrap_or_else(|| snake_case(name));

                Ok(self.upload_to(backend))
            }
            _ => Err(UploadError::unsupported_call(method)),
        }
    }

    /// Compose the final storage key for the given extension.
    ///
    /// A non-empty folder contributes exactly one trailing slash; an
    /// empty folder contributes nothing. When no filename is set a
    /// fresh opaque name is generated on every call.
    pub fn resolved_key(&self, extension: &str) -> String {
        let folder = if self.folder.is_empty() {
            String::new()
        } else {
            format!("{}/", self.folder.trim_end_matches('/'))
        };

        let filename = self.filename.clone().unwrap_or_else(generate_unique_name);

        format!("{}{}.{}", folder, filename, extension)
    }
}

/// Result of a single upload attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Whether the blob store accepted the write
    pub success: bool,
    /// Resolved storage key, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl UploadOutcome {
    /// Outcome of an accepted write
    pub fn uploaded(key: impl Into<String>) -> Self {
        Self {
            success: true,
            key: Some(key.into()),
        }
    }

    /// Outcome of a declined write
    pub fn rejected() -> Self {
        Self {
            success: false,
            key: None,
        }
    }
}

/// Source-compatible snake_case: an underscore before every uppercase
/// letter past the first character, then lowercase the whole string.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    out
}
