//! Upload execution
//!
//! The uploader wires a provider and a blob store together: validate
//! the file, resolve the storage key, read the contents, write them,
//! report the outcome.

use crate::error::{Result, UploadError};
use crate::provider::Provider;
use crate::store::BlobStore;
use crate::upload::request::{UploadOutcome, UploadRequest, DEFAULT_BACKEND};

/// Executes uploads against an injected provider and blob store.
///
/// The uploader borrows both collaborators; their lifetimes stay with
/// the caller. Construct one uploader per upload operation and drive it
/// from a single thread. Re-invoking [`upload`](Uploader::upload) on
/// the same instance repeats the whole flow with the current request
/// and yields a new independent outcome.
pub struct Uploader<'a, P: Provider, S: BlobStore> {
    provider: &'a mut P,
    store: &'a S,
}

impl<'a, P: Provider, S: BlobStore> Uploader<'a, P, S> {
    /// Create a new uploader from its two collaborators
    pub fn new(provider: &'a mut P, store: &'a S) -> Self {
        Self { provider, store }
    }

    /// Upload `file` as configured by `request`.
    ///
    /// An invalid file is an error and aborts the attempt before any
    /// write. A write the backend declines is not an error: it yields
    /// an outcome with `success` false and runs no callback.
    pub fn upload(&mut self, request: &UploadRequest, file: &str) -> Result<UploadOutcome> {
        self.provider.set_file(file);

        if !self.provider.is_valid() {
            return Err(UploadError::invalid_file(file));
        }

        let backend = request.backend.as_deref().unwrap_or(DEFAULT_BACKEND);
        let key = request.resolved_key(&self.provider.extension());
        let contents = self.provider.contents()?;

        log::debug!("uploading {} as {} on backend {}", file, key, backend);

        if !self
            .store
            .put(backend, &key, &contents, request.visibility.as_deref())
        {
            log::warn!("backend {} declined write of {}", backend, key);
            return Ok(UploadOutcome::rejected());
        }

        if let Some(callback) = &request.on_success {
            callback(&key);
        }

        Ok(UploadOutcome::uploaded(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StubProvider {
        file: Option<String>,
        valid: bool,
        contents: Vec<u8>,
        extension: String,
    }

    impl StubProvider {
        fn valid(contents: &[u8], extension: &str) -> Self {
            Self {
                file: None,
                valid: true,
                contents: contents.to_vec(),
                extension: extension.to_string(),
            }
        }

        fn invalid() -> Self {
            Self {
                file: None,
                valid: false,
                contents: Vec::new(),
                extension: String::new(),
            }
        }
    }

    impl Provider for StubProvider {
        fn set_file(&mut self, file: &str) {
            self.file = Some(file.to_string());
        }

        fn is_valid(&self) -> bool {
            self.valid
        }

        fn contents(&self) -> Result<Vec<u8>> {
            Ok(self.contents.clone())
        }

        fn extension(&self) -> String {
            self.extension.clone()
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        accept: bool,
        calls: Mutex<Vec<(String, String, Vec<u8>, Option<String>)>>,
    }

    impl RecordingStore {
        fn accepting() -> Self {
            Self {
                accept: true,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn declining() -> Self {
            Self::default()
        }
    }

    impl BlobStore for RecordingStore {
        fn put(&self, backend: &str, key: &str, contents: &[u8], visibility: Option<&str>) -> bool {
            self.calls.lock().unwrap().push((
                backend.to_string(),
                key.to_string(),
                contents.to_vec(),
                visibility.map(String::from),
            ));
            self.accept
        }
    }

    #[test]
    fn test_upload_writes_resolved_key() {
        let mut provider = StubProvider::valid(b"fake image", "png");
        let store = RecordingStore::accepting();

        let request = UploadRequest::new()
            .upload_to("s3")
            .to_folder("avatars")
            .rename_to("profile")
            .visibility("public");

        let outcome = Uploader::new(&mut provider, &store)
            .upload(&request, "photo.png")
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.key.as_deref(), Some("avatars/profile.png"));

        let calls = store.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "s3");
        assert_eq!(calls[0].1, "avatars/profile.png");
        assert_eq!(calls[0].2, b"fake image");
        assert_eq!(calls[0].3.as_deref(), Some("public"));
    }

    #[test]
    fn test_default_backend_when_unset() {
        let mut provider = StubProvider::valid(b"data", "txt");
        let store = RecordingStore::accepting();

        Uploader::new(&mut provider, &store)
            .upload(&UploadRequest::new().rename_to("notes"), "notes.txt")
            .unwrap();

        assert_eq!(store.calls.lock().unwrap()[0].0, DEFAULT_BACKEND);
    }

    #[test]
    fn test_invalid_file_never_reaches_store() {
        let mut provider = StubProvider::invalid();
        let store = RecordingStore::accepting();

        let err = Uploader::new(&mut provider, &store)
            .upload(&UploadRequest::new(), "bad.bin")
            .unwrap_err();

        assert!(matches!(&err, UploadError::InvalidFile { file } if file == "bad.bin"));
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_callback_runs_once_on_success() {
        let mut provider = StubProvider::valid(b"data", "txt");
        let store = RecordingStore::accepting();

        let invocations = Arc::new(AtomicUsize::new(0));
        let seen_key = Arc::new(Mutex::new(None));

        let counter = Arc::clone(&invocations);
        let slot = Arc::clone(&seen_key);
        let request = UploadRequest::new().rename_to("notes").on_success(move |key| {
            counter.fetch_add(1, Ordering::SeqCst);
            *slot.lock().unwrap() = Some(key.to_string());
        });

        Uploader::new(&mut provider, &store)
            .upload(&request, "notes.txt")
            .unwrap();

        assert_eq!(invocations.load(Ordering::SeqCst), 1);
        assert_eq!(seen_key.lock().unwrap().as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_declined_write_reports_failure_without_callback() {
        let mut provider = StubProvider::valid(b"data", "txt");
        let store = RecordingStore::declining();

        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invocations);
        let request = UploadRequest::new().on_success(move |_key| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let outcome = Uploader::new(&mut provider, &store)
            .upload(&request, "notes.txt")
            .unwrap();

        assert!(!outcome.success);
        assert!(outcome.key.is_none());
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
        assert_eq!(store.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_repeat_upload_generates_fresh_keys() {
        let mut provider = StubProvider::valid(b"data", "jpg");
        let store = RecordingStore::accepting();

        let request = UploadRequest::new();
        let mut uploader = Uploader::new(&mut provider, &store);

        let first = uploader.upload(&request, "photo.jpg").unwrap();
        let second = uploader.upload(&request, "photo.jpg").unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(store.calls.lock().unwrap().len(), 2);
    }
}
