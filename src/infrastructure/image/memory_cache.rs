//! In-memory LRU image cache bounded by decoded size.

use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::ImageId;

/// Default memory budget (100 MiB).
pub const DEFAULT_MEMORY_CACHE_BYTES: usize = 100 * 1024 * 1024;

struct Entries {
    lru: LruCache<ImageId, Arc<image::DynamicImage>>,
    bytes: usize,
}

/// In-memory LRU cache for decoded images.
///
/// Capacity is measured in decoded pixel bytes. Lookups and clears are
/// synchronous so the cache can be emptied from the primary context.
pub struct MemoryImageCache {
    entries: Mutex<Entries>,
    capacity: usize,
}

impl MemoryImageCache {
    /// Creates a cache holding at most `capacity` decoded bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries {
                lru: LruCache::unbounded(),
                bytes: 0,
            }),
            capacity,
        }
    }

    /// Gets an image, promoting it in the LRU.
    pub fn get(&self, id: &ImageId) -> Option<Arc<image::DynamicImage>> {
        let mut entries = self.entries.lock();
        if let Some(img) = entries.lru.get(id) {
            trace!(id = %id, "Memory cache hit");
            Some(Arc::clone(img))
        } else {
            trace!(id = %id, "Memory cache miss");
            None
        }
    }

    /// Stores an image, evicting least recently used entries over capacity.
    /// Images larger than the whole budget are not retained.
    pub fn put(&self, id: ImageId, image: Arc<image::DynamicImage>) {
        let size = image_size(&image);
        if size > self.capacity {
            debug!(id = %id, size, capacity = self.capacity, "Image exceeds memory cache budget");
            return;
        }

        let mut entries = self.entries.lock();
        if let Some(old) = entries.lru.put(id.clone(), image) {
            entries.bytes -= image_size(&old);
        }
        entries.bytes += size;

        while entries.bytes > self.capacity {
            let Some((evicted, img)) = entries.lru.pop_lru() else {
                break;
            };
            entries.bytes -= image_size(&img);
            trace!(id = %evicted, "Evicted image from memory cache");
        }
        debug!(id = %id, size, "Stored image in memory cache");
    }

    /// Returns true if `id` is cached, without promoting it.
    pub fn contains(&self, id: &ImageId) -> bool {
        self.entries.lock().lru.contains(id)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries.lock().lru.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decoded bytes currently held.
    pub fn size_bytes(&self) -> usize {
        self.entries.lock().bytes
    }

    /// Drops every cached image.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.lru.clear();
        entries.bytes = 0;
        debug!("Cleared memory image cache");
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CACHE_BYTES)
    }
}

fn image_size(image: &image::DynamicImage) -> usize {
    image.as_bytes().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10x10 RGB8 = 300 bytes
    fn small() -> Arc<image::DynamicImage> {
        Arc::new(image::DynamicImage::new_rgb8(10, 10))
    }

    #[test]
    fn test_put_and_get() {
        let cache = MemoryImageCache::new(1024);
        let id = ImageId::new("a");

        cache.put(id.clone(), small());

        assert_eq!(cache.get(&id).map(|img| img.width()), Some(10));
        assert_eq!(cache.size_bytes(), 300);
    }

    #[test]
    fn test_byte_capacity_eviction() {
        let cache = MemoryImageCache::new(700);
        let (a, b, c) = (ImageId::new("a"), ImageId::new("b"), ImageId::new("c"));

        cache.put(a.clone(), small());
        cache.put(b.clone(), small());
        let _ = cache.get(&a);
        cache.put(c.clone(), small());

        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.contains(&c));
        assert_eq!(cache.size_bytes(), 600);
    }

    #[test]
    fn test_oversized_image_not_retained() {
        let cache = MemoryImageCache::new(100);

        cache.put(ImageId::new("big"), small());

        assert!(cache.is_empty());
    }

    #[test]
    fn test_replace_updates_size() {
        let cache = MemoryImageCache::new(10_000);
        let id = ImageId::new("a");

        cache.put(id.clone(), small());
        cache.put(id, Arc::new(image::DynamicImage::new_rgb8(20, 10)));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size_bytes(), 600);
    }

    #[test]
    fn test_clear() {
        let cache = MemoryImageCache::new(10_000);
        let id = ImageId::new("a");
        cache.put(id.clone(), small());
        assert!(cache.get(&ImageId::new("missing")).is_none());

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.size_bytes(), 0);
        assert!(cache.get(&id).is_none());
    }
}
