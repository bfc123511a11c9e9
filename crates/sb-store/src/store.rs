//! Filesystem-level image storage.
//!
//! Every uploaded image is one regular file directly under the store's root
//! directory, named by its storage key. There is no index or sidecar
//! metadata; the directory listing is the source of truth.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use sb_core::{Error, Result};

/// Filesystem manager for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until
    /// [`init`](Self::init) is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The managed directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the managed directory if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
            tracing::info!("Created upload directory {}", self.root.display());
        }
        Ok(())
    }

    /// Write `bytes` as the full content of `key`, replacing any existing file.
    ///
    /// The bytes go to a hidden `.part` file first and are renamed onto the
    /// key once complete, so `key` never names a partially written file.
    pub fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self
            .path_for(key)
            .ok_or_else(|| Error::Validation(format!("invalid storage key: {key:?}")))?;

        let mut part = tempfile::Builder::new()
            .prefix(".")
            .suffix(".part")
            .tempfile_in(&self.root)?;
        part.write_all(bytes)?;
        part.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(key, size = bytes.len(), "Stored image");
        Ok(())
    }

    /// Whether a file named `key` is present in the managed directory.
    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_some_and(|p| p.is_file())
    }

    /// Names of all regular files in the managed directory.
    ///
    /// A missing directory is treated as an empty store.
    pub fn list_keys(&self) -> Result<BTreeSet<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = BTreeSet::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if is_plain_key(&name) => {
                    keys.insert(name);
                }
                Ok(name) => {
                    tracing::debug!("Skipping unservable filename {:?}", name);
                }
                Err(name) => {
                    tracing::debug!("Skipping non UTF-8 filename {:?}", name);
                }
            }
        }
        Ok(keys)
    }

    /// Read the full content of `key`.
    pub fn get_bytes(&self, key: &str) -> Result<Vec<u8>> {
        let path = self
            .path_for(key)
            .ok_or_else(|| Error::not_found("image", key))?;

        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found("image", key))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// MIME type to serve `key` with, guessed from its extension.
    pub fn content_type(key: &str) -> String {
        mime_guess::from_path(key)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Resolve `key` to a path directly under the root, or `None` if the key
    /// is anything other than one plain filename.
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        is_plain_key(key).then(|| self.root.join(key))
    }
}

/// A key is exactly one normal path component with no separator of either
/// style. Only such keys are listed or resolved.
fn is_plain_key(key: &str) -> bool {
    if key.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(key).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("uploads"));
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn init_creates_directory_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("nested/uploads"));
        assert!(!store.root().exists());
        store.init().unwrap();
        assert!(store.root().is_dir());
        store.init().unwrap();
    }

    #[test]
    fn put_then_get_returns_same_bytes() {
        let (_dir, store) = store();
        let payload = b"\x89PNG\r\n\x1a\n not really a png";
        store.put("20240501_100000_cat.png", payload).unwrap();
        assert!(store.exists("20240501_100000_cat.png"));
        assert_eq!(store.get_bytes("20240501_100000_cat.png").unwrap(), payload);
    }

    #[test]
    fn put_overwrites_existing_key() {
        let (_dir, store) = store();
        store.put("k.jpg", b"first").unwrap();
        store.put("k.jpg", b"second").unwrap();
        assert_eq!(store.get_bytes("k.jpg").unwrap(), b"second");
        assert_eq!(store.list_keys().unwrap().len(), 1);
    }

    #[test]
    fn get_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.get_bytes("nope.png").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!store.exists("nope.png"));
    }

    #[test]
    fn traversal_keys_never_resolve() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("secret.txt"), b"outside").unwrap();

        for key in ["../secret.txt", "..", ".", "", "a/b.png", "a\\b.png"] {
            assert!(!store.exists(key), "{key:?} should not exist");
            assert!(matches!(
                store.get_bytes(key).unwrap_err(),
                Error::NotFound { .. }
            ));
        }
        assert!(matches!(
            store.put("../escape.png", b"x").unwrap_err(),
            Error::Validation(_)
        ));
        assert!(!dir.path().join("escape.png").exists());
    }

    #[test]
    fn list_keys_includes_all_files_but_not_directories() {
        let (_dir, store) = store();
        store.put("a.png", b"1").unwrap();
        store.put("notes.txt", b"2").unwrap();
        std::fs::create_dir(store.root().join("sub.png")).unwrap();

        let keys: Vec<_> = store.list_keys().unwrap().into_iter().collect();
        assert_eq!(keys, vec!["a.png".to_string(), "notes.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn list_keys_skips_names_that_cannot_be_fetched() {
        let (_dir, store) = store();
        std::fs::write(store.root().join("20240501_100000_a\\b.png"), b"x").unwrap();
        store.put("20240501_100001_ok.png", b"y").unwrap();

        let keys = store.list_keys().unwrap();
        assert_eq!(keys.len(), 1);
        for key in &keys {
            assert!(store.get_bytes(key).is_ok());
        }
    }

    #[test]
    fn put_leaves_no_part_files_behind() {
        let (_dir, store) = store();
        store.put("20240501_100000_cat.png", b"meow").unwrap();
        store.put("20240501_100000_cat.png", b"purr").unwrap();

        let names: Vec<_> = std::fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["20240501_100000_cat.png".to_string()]);
        assert_eq!(store.get_bytes("20240501_100000_cat.png").unwrap(), b"purr");
    }

    #[test]
    fn concurrent_listing_never_sees_partial_writes() {
        let (_dir, store) = store();
        let payload = vec![0x5Au8; 8 * 1024 * 1024];
        let key = "20240501_100000_big.png";

        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                for _ in 0..10 {
                    store.put(key, &payload).unwrap();
                }
            });

            while !writer.is_finished() {
                for listed in crate::listing::list_images(&store).unwrap() {
                    let len = std::fs::metadata(store.root().join(&listed))
                        .map(|m| m.len())
                        .unwrap_or(payload.len() as u64);
                    assert_eq!(len, payload.len() as u64, "{listed} listed while partial");
                }
            }
            writer.join().unwrap();
        });

        assert_eq!(crate::listing::list_images(&store).unwrap(), vec![key.to_string()]);
    }

    #[test]
    fn list_keys_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("never-created"));
        assert!(store.list_keys().unwrap().is_empty());
    }

    #[test]
    fn put_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("never-created"));
        let err = store.put("a.png", b"1").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(ImageStore::content_type("x.png"), "image/png");
        assert_eq!(ImageStore::content_type("x.JPG"), "image/jpeg");
        assert_eq!(ImageStore::content_type("x.gif"), "image/gif");
        assert_eq!(ImageStore::content_type("x"), "application/octet-stream");
    }
}
