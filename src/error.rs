//! Error handling for the uploader
//!
//! This module defines the error types used throughout the library.
//! A write the blob store declines is deliberately not represented
//! here: the uploader reports it through the upload outcome instead.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, UploadError>;

/// Error types that can occur while configuring or running an upload
#[derive(Error, Debug)]
pub enum UploadError {
    /// The provider rejected the file
    #[error("given file [{file}] is not valid")]
    InvalidFile { file: String },

    /// An unrecognized configuration method name was applied
    #[error("call to undefined configuration method [{method}]")]
    UnsupportedCall { method: String },

    /// Invalid parameter
    #[error("invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UploadError {
    /// Create a new invalid file error
    pub fn invalid_file(file: impl Into<String>) -> Self {
        UploadError::InvalidFile { file: file.into() }
    }

    /// Create a new unsupported call error
    pub fn unsupported_call(method: impl Into<String>) -> Self {
        UploadError::UnsupportedCall {
            method: method.into(),
        }
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        UploadError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}
