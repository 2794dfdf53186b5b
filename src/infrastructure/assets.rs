//! Directory-backed bundled asset store.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::domain::ports::AssetStorePort;

/// Assets shipped alongside the application under one root directory.
#[derive(Debug, Clone)]
pub struct BundledAssets {
    root: PathBuf,
}

impl BundledAssets {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset path escapes the asset root: {path}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetStorePort for BundledAssets {
    fn probe(&self, path: &str) -> io::Result<()> {
        let full = self.resolve(path)?;
        if !fs::File::open(&full)?.metadata()?.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()));
        }
        trace!(path = %full.display(), "Asset present");
        Ok(())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path)?)
    }
}
