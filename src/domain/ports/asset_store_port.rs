//! Port for the bundled asset store.

use std::io;

/// Read-only store of assets shipped with the application.
pub trait AssetStorePort: Send + Sync {
    /// Checks that `path` can be opened.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the asset cannot be opened.
    fn probe(&self, path: &str) -> io::Result<()>;

    /// Reads the full contents of `path`.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the asset cannot be read.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// In-memory asset store.
    #[derive(Default)]
    pub struct InMemoryAssets {
        files: HashMap<String, Vec<u8>>,
        broken: bool,
    }

    impl InMemoryAssets {
        pub fn new() -> Self {
            Self::default()
        }

        /// Store containing the given paths with placeholder contents.
        pub fn with_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
            Self {
                files: paths
                    .into_iter()
                    .map(|p| (p.to_string(), b"asset".to_vec()))
                    .collect(),
                broken: false,
            }
        }

        /// Store containing one file with real contents.
        pub fn with_file(path: &str, contents: Vec<u8>) -> Self {
            Self {
                files: HashMap::from([(path.to_string(), contents)]),
                broken: false,
            }
        }

        /// Store whose every probe fails with a non-`NotFound` error.
        pub fn broken() -> Self {
            Self {
                files: HashMap::new(),
                broken: true,
            }
        }
    }

    impl AssetStorePort for InMemoryAssets {
        fn probe(&self, path: &str) -> io::Result<()> {
            self.read(path).map(|_| ())
        }

        fn read(&self, path: &str) -> io::Result<Vec<u8>> {
            if self.broken {
                return Err(io::Error::other("asset store unavailable"));
            }
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }
    }
}
