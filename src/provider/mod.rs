//! File providers
//!
//! A provider hands the uploader everything it needs to know about the
//! file being uploaded: whether it is valid, its raw contents, and the
//! extension used to name the stored object.

pub mod local;

pub use local::LocalFileProvider;

use crate::error::Result;

/// Validation and content port for the file being uploaded.
///
/// The uploader never touches the file itself; it asks the provider for
/// validity, raw bytes, and the extension. Implementations can read
/// from the local filesystem, an HTTP request body, or anywhere else.
pub trait Provider {
    /// Point the provider at the file to upload
    fn set_file(&mut self, file: &str);

    /// Whether the current file can be uploaded
    fn is_valid(&self) -> bool;

    /// Raw contents of the current file
    fn contents(&self) -> Result<Vec<u8>>;

    /// Extension for the stored object, without the leading dot
    fn extension(&self) -> String;
}
