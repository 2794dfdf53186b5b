//! Disk-based image cache for persistence across sessions.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};

use crate::domain::entities::ImageId;
use crate::domain::errors::{CacheError, CacheResult};

/// Maximum disk cache size in bytes (1 GiB default).
pub const DEFAULT_MAX_CACHE_SIZE: u64 = 1024 * 1024 * 1024;

const ENTRY_EXTENSION: &str = "img";
const PARTIAL_EXTENSION: &str = "part";

/// Disk-based image cache that persists encoded image bytes.
///
/// One instance owns one directory; the engine keeps raw source data and
/// decoded resources in separate instances.
pub struct DiskImageCache {
    cache_dir: PathBuf,
    max_size: u64,
    current_size: AtomicU64,
    item_count: AtomicUsize,
}

impl DiskImageCache {
    /// Creates a new disk cache in the specified directory.
    ///
    /// # Errors
    /// Returns error if cache directory cannot be created.
    pub async fn new(cache_dir: PathBuf, max_size: u64) -> CacheResult<Self> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to create cache dir: {e}")))?;
        let mut total_size = 0u64;
        let mut count = 0usize;

        let mut entries = fs::read_dir(&cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to read cache dir: {e}")))?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION)
                && let Ok(meta) = entry.metadata().await
            {
                total_size += meta.len();
                count += 1;
            }
        }

        let cache = Self {
            cache_dir,
            max_size,
            current_size: AtomicU64::new(total_size),
            item_count: AtomicUsize::new(count),
        };

        cache.cleanup_if_needed().await;

        Ok(cache)
    }

    /// Directory this cache writes to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path for a cached image.
    fn cache_path(&self, id: &ImageId) -> PathBuf {
        self.cache_dir.join(format!("{}.{ENTRY_EXTENSION}", id.as_str()))
    }

    /// Gets raw image bytes from disk cache.
    pub async fn get_bytes(&self, id: &ImageId) -> Option<Vec<u8>> {
        let path = self.cache_path(id);
        if let Ok(bytes) = fs::read(&path).await {
            trace!(id = %id, path = %path.display(), "Disk cache hit");
            Some(bytes)
        } else {
            trace!(id = %id, "Disk cache miss");
            None
        }
    }

    /// Stores bytes in the disk cache.
    ///
    /// Bytes land in a partial file first and are renamed into place, so a
    /// concurrent reader never sees a truncated entry.
    ///
    /// # Errors
    /// Returns error if file cannot be created or written.
    pub async fn put_bytes(&self, id: &ImageId, bytes: &[u8]) -> CacheResult<()> {
        let path = self.cache_path(id);
        let partial = path.with_extension(PARTIAL_EXTENSION);

        let old_size = fs::metadata(&path).await.map(|m| m.len()).ok();

        let mut file = fs::File::create(&partial)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to create cache file: {e}")))?;
        file.write_all(bytes)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to write cache file: {e}")))?;
        file.flush()
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to flush cache file: {e}")))?;
        drop(file);

        fs::rename(&partial, &path)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to commit cache file: {e}")))?;

        let new_size = bytes.len() as u64;
        match old_size {
            Some(old) if new_size >= old => {
                self.current_size.fetch_add(new_size - old, Ordering::Relaxed);
            }
            Some(old) => self.shrink(old - new_size, 0),
            None => {
                self.current_size.fetch_add(new_size, Ordering::Relaxed);
                self.item_count.fetch_add(1, Ordering::Relaxed);
            }
        }

        trace!(id = %id, path = %path.display(), size = bytes.len(), "Stored image on disk");

        self.cleanup_if_needed().await;

        Ok(())
    }

    /// Removes an image from disk cache.
    pub async fn evict(&self, id: &ImageId) {
        let path = self.cache_path(id);
        let size = fs::metadata(&path).await.map(|m| m.len()).ok();
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(id = %id, error = %e, "Failed to evict from disk cache");
            }
        } else if let Some(s) = size {
            self.shrink(s, 1);
            debug!(id = %id, "Evicted from disk cache");
        }
    }

    /// Clears the cache with blocking I/O.
    ///
    /// Meant for a dedicated background thread outside any async runtime.
    ///
    /// # Errors
    /// Returns error if the directory cannot be read or an entry cannot be removed.
    pub fn clear_blocking(&self) -> CacheResult<()> {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(CacheError::IoError(format!(
                    "Failed to read cache dir: {e}"
                )));
            }
        };

        let mut removed = 0usize;
        for entry in entries {
            let entry =
                entry.map_err(|e| CacheError::IoError(format!("Failed to read entry: {e}")))?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == ENTRY_EXTENSION || ext == PARTIAL_EXTENSION)
            {
                match std::fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    // renamed or evicted by a concurrent writer
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(CacheError::IoError(format!(
                            "Failed to remove {}: {e}",
                            path.display()
                        )));
                    }
                }
            }
        }

        self.current_size.store(0, Ordering::Relaxed);
        self.item_count.store(0, Ordering::Relaxed);
        debug!(dir = %self.cache_dir.display(), removed, "Cleared disk cache");
        Ok(())
    }

    /// Returns the current cache size in bytes.
    #[allow(clippy::unused_async)]
    pub async fn current_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    /// Returns the number of cached files.
    #[allow(clippy::unused_async)]
    pub async fn len(&self) -> usize {
        self.item_count.load(Ordering::Relaxed)
    }

    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Lowers the counters, saturating at zero.
    ///
    /// A clear on another thread may reset them between a caller reading an
    /// entry's size and subtracting it.
    fn shrink(&self, bytes: u64, items: usize) {
        let _ = self
            .current_size
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(v.saturating_sub(bytes))
            });
        let _ = self
            .item_count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(v.saturating_sub(items))
            });
    }

    /// Cleans up old cache entries if over size limit.
    async fn cleanup_if_needed(&self) {
        let current_size = self.current_size().await;
        if current_size <= self.max_size {
            return;
        }

        debug!(
            current_size = current_size,
            max_size = self.max_size,
            "Disk cache over limit, cleaning up"
        );

        let Ok(mut entries) = fs::read_dir(&self.cache_dir).await else {
            return;
        };

        let mut files: Vec<(PathBuf, std::time::SystemTime, u64)> = Vec::new();

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != ENTRY_EXTENSION) {
                continue;
            }

            if let Ok(meta) = entry.metadata().await {
                let accessed = meta.accessed().unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                files.push((path, accessed, meta.len()));
            }
        }

        files.sort_by_key(|(_, time, _)| *time);

        let mut freed_size = 0u64;
        let mut freed_count = 0usize;
        let target = current_size - self.max_size + (self.max_size / 10);

        for (path, _, size) in files {
            if freed_size >= target {
                break;
            }

            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove old cache file");
            } else {
                debug!(path = %path.display(), "Removed old cache file");
                freed_size += size;
                freed_count += 1;
            }
        }
        self.shrink(freed_size, freed_count);

        debug!(
            freed_size = freed_size,
            freed_count = freed_count,
            "Disk cache cleanup complete"
        );
    }

    /// Checks if an image is cached.
    pub async fn contains(&self, id: &ImageId) -> bool {
        let path = self.cache_path(id);
        fs::try_exists(&path).await.unwrap_or(false)
    }
}
