pub mod error;
pub mod provider;
pub mod store;
pub mod upload;

pub use error::{Result, UploadError};

pub use provider::{LocalFileProvider, Provider};

pub use store::{BlobStore, DiskStore, MemoryObject, MemoryStore, StoredObject};

pub use upload::{generate_unique_name, UploadOutcome, UploadRequest, Uploader, DEFAULT_BACKEND};
