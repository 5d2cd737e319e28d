//! Filesystem-backed file provider

use crate::error::{Result, UploadError};
use crate::provider::Provider;
use std::fs;
use std::path::{Path, PathBuf};

/// Provider that reads the file to upload from the local filesystem.
///
/// A file is valid when it exists and is a regular file. The extension
/// is taken from the path and lowercased.
#[derive(Debug, Default)]
pub struct LocalFileProvider {
    file: Option<PathBuf>,
}

impl LocalFileProvider {
    /// Create a new provider with no file set
    pub fn new() -> Self {
        Self::default()
    }
}

impl Provider for LocalFileProvider {
    fn set_file(&mut self, file: &str) {
        self.file = Some(PathBuf::from(file));
    }

    fn is_valid(&self) -> bool {
        self.file.as_deref().map(Path::is_file).unwrap_or(false)
    }

    fn contents(&self) -> Result<Vec<u8>> {
        match &self.file {
            Some(path) => Ok(fs::read(path)?),
            None => Err(UploadError::invalid_parameter(
                "file",
                "no file has been set",
            )),
        }
    }

    fn extension(&self) -> String {
        self.file
            .as_deref()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default()
    }
}
