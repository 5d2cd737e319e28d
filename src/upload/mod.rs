//! Upload configuration and execution
//!
//! This module provides the fluent request builder, generated object
//! names, and the uploader that drives a provider and a blob store
//! through a single upload.

pub mod filename;
pub mod request;
pub mod uploader;

pub use filename::generate_unique_name;
pub use request::{UploadOutcome, UploadRequest, DEFAULT_BACKEND};
pub use uploader::Uploader;
