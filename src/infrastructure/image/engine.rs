//! Default fetch/decode/cache engine.
//!
//! Lookup order: Memory -> Resource disk -> Data disk -> Source (asset or network)

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, trace, warn};

use crate::domain::entities::{EngineSource, FetchDescriptor, FetchTarget, Headers, ImageId};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::{AssetStorePort, ImageEnginePort};

use super::disk_cache::{DEFAULT_MAX_CACHE_SIZE, DiskImageCache};
use super::memory_cache::{DEFAULT_MEMORY_CACHE_BYTES, MemoryImageCache};

const DATA_DIR: &str = "data";
const RESOURCE_DIR: &str = "resource";

/// Configuration for the image engine.
#[derive(Debug, Clone)]
pub struct ImageEngineConfig {
    /// Root directory of the disk tier.
    pub cache_dir: PathBuf,
    /// Memory budget in decoded bytes.
    pub memory_cache_bytes: usize,
    /// Disk budget in bytes, shared by data and resource caches.
    pub disk_cache_bytes: u64,
    /// Resources larger than this on either side are downscaled.
    pub max_resource_dimension: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with network requests.
    pub user_agent: String,
}

impl ImageEngineConfig {
    /// Defaults rooted at `cache_dir`.
    #[must_use]
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            memory_cache_bytes: DEFAULT_MEMORY_CACHE_BYTES,
            disk_cache_bytes: DEFAULT_MAX_CACHE_SIZE,
            max_resource_dimension: 1024,
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Engine owning the memory and disk tiers.
///
/// Remote sources are persisted as raw data; bundled assets, which are
/// already on the device, only get their decoded resource persisted.
pub struct ImageEngine {
    memory_cache: MemoryImageCache,
    data_cache: DiskImageCache,
    resource_cache: DiskImageCache,
    assets: Arc<dyn AssetStorePort>,
    http_client: reqwest::Client,
    config: ImageEngineConfig,
}

impl std::fmt::Debug for ImageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ImageEngine {
    /// Creates the engine, preparing its cache directories.
    ///
    /// # Errors
    /// Returns error if a cache directory or the HTTP client cannot be created.
    pub async fn new(
        config: ImageEngineConfig,
        assets: Arc<dyn AssetStorePort>,
    ) -> CacheResult<Self> {
        let disk_half = config.disk_cache_bytes / 2;
        let data_cache = DiskImageCache::new(config.cache_dir.join(DATA_DIR), disk_half).await?;
        let resource_cache =
            DiskImageCache::new(config.cache_dir.join(RESOURCE_DIR), disk_half).await?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CacheError::NetworkError(format!("Failed to create HTTP client: {e}")))?;

        debug!(cache_dir = %config.cache_dir.display(), "Image engine ready");

        Ok(Self {
            memory_cache: MemoryImageCache::new(config.memory_cache_bytes),
            data_cache,
            resource_cache,
            assets,
            http_client,
            config,
        })
    }

    /// The in-process memory tier.
    #[must_use]
    pub const fn memory_cache(&self) -> &MemoryImageCache {
        &self.memory_cache
    }

    /// Raw source bytes persisted for remote targets.
    #[must_use]
    pub const fn data_cache(&self) -> &DiskImageCache {
        &self.data_cache
    }

    /// Decoded resources persisted after transformation.
    #[must_use]
    pub const fn resource_cache(&self) -> &DiskImageCache {
        &self.resource_cache
    }

    async fn fetch_source(&self, target: &FetchTarget) -> CacheResult<Bytes> {
        match target {
            FetchTarget::Local(path) => {
                let assets = Arc::clone(&self.assets);
                let path = path.clone();
                tokio::task::spawn_blocking(move || assets.read(&path).map_err(|e| (path, e)))
                    .await
                    .map_err(|e| CacheError::IoError(format!("Asset read task panicked: {e}")))?
                    .map(Bytes::from)
                    .map_err(|(path, e)| match e.kind() {
                        std::io::ErrorKind::NotFound => CacheError::NotFound(path),
                        _ => CacheError::IoError(format!("Failed to read asset {path}: {e}")),
                    })
            }
            FetchTarget::Remote { url, headers } => self.download(url, headers).await,
        }
    }

    /// Downloads image bytes from a URL.
    async fn download(&self, url: &str, headers: &Headers) -> CacheResult<Bytes> {
        debug!(url = %url, headers = headers.len(), "Downloading image from network");

        let response = self
            .http_client
            .get(url)
            .headers(header_map(headers))
            .send()
            .await
            .map_err(|e| CacheError::NetworkError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CacheError::NetworkError(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| CacheError::NetworkError(format!("Failed to read body: {e}")))
    }

    /// Decodes source bytes and downscales them into a cacheable resource.
    async fn transform(&self, bytes: Bytes) -> CacheResult<(image::DynamicImage, Vec<u8>)> {
        let max = self.config.max_resource_dimension;
        tokio::task::spawn_blocking(move || {
            let img = image::load_from_memory(&bytes)
                .map_err(|e| CacheError::DecodeError(format!("Failed to decode image: {e}")))?;
            let img = if img.width() > max || img.height() > max {
                img.resize(max, max, image::imageops::FilterType::Lanczos3)
            } else {
                img
            };
            let encoded = encode_png(&img)?;
            Ok((img, encoded))
        })
        .await
        .map_err(|e| CacheError::DecodeError(format!("Decode task panicked: {e}")))?
    }

    async fn decode(bytes: Vec<u8>) -> CacheResult<image::DynamicImage> {
        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| CacheError::DecodeError(format!("Decode task panicked: {e}")))?
            .map_err(|e| CacheError::DecodeError(format!("Failed to decode image: {e}")))
    }

    async fn cached_resource(&self, id: &ImageId) -> Option<image::DynamicImage> {
        let bytes = self.resource_cache.get_bytes(id).await?;
        match Self::decode(bytes).await {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(id = %id, error = %e, "Dropping unreadable cached resource");
                self.resource_cache.evict(id).await;
                None
            }
        }
    }

    fn retain(&self, descriptor: &FetchDescriptor, id: &ImageId, img: image::DynamicImage) {
        if descriptor.skip_memory_cache() {
            trace!(id = %id, "Skipping memory cache");
        } else {
            self.memory_cache.put(id.clone(), Arc::new(img));
        }
    }

    async fn store_resource(&self, id: &ImageId, encoded: &[u8]) {
        if let Err(e) = self.resource_cache.put_bytes(id, encoded).await {
            warn!(id = %id, error = %e, "Failed to cache resource to disk");
        }
    }
}

#[async_trait]
impl ImageEnginePort for ImageEngine {
    async fn preload(&self, descriptor: &FetchDescriptor) -> CacheResult<EngineSource> {
        let target = descriptor.target();
        let id = ImageId::from_token(&target.token());

        if !descriptor.skip_memory_cache() && self.memory_cache.get(&id).is_some() {
            return Ok(EngineSource::MemoryCache);
        }

        if let Some(img) = self.cached_resource(&id).await {
            self.retain(descriptor, &id, img);
            return Ok(EngineSource::ResourceDiskCache);
        }

        if let Some(bytes) = self.data_cache.get_bytes(&id).await {
            match self.transform(Bytes::from(bytes)).await {
                Ok((img, encoded)) => {
                    self.store_resource(&id, &encoded).await;
                    self.retain(descriptor, &id, img);
                    return Ok(EngineSource::DataDiskCache);
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Dropping unreadable cached data");
                    self.data_cache.evict(&id).await;
                }
            }
        }

        let bytes = self.fetch_source(target).await?;
        let (img, encoded) = self.transform(bytes.clone()).await?;

        let source = if target.is_local() {
            self.store_resource(&id, &encoded).await;
            EngineSource::Local
        } else {
            if let Err(e) = self.data_cache.put_bytes(&id, &bytes).await {
                warn!(id = %id, error = %e, "Failed to cache data to disk");
            }
            EngineSource::Remote
        };
        self.retain(descriptor, &id, img);

        debug!(id = %id, ?source, "Image fetched from source");
        Ok(source)
    }

    fn clear_memory(&self) -> CacheResult<()> {
        self.memory_cache.clear();
        Ok(())
    }

    fn clear_disk(&self) -> CacheResult<()> {
        let data = self.data_cache.clear_blocking();
        let resource = self.resource_cache.clear_blocking();
        data.and(resource)
    }
}

/// Converts request headers, skipping entries that are not valid HTTP.
fn header_map(headers: &Headers) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers.iter() {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!(header = %key, "Skipping invalid request header"),
        }
    }
    map
}

fn encode_png(img: &image::DynamicImage) -> CacheResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| CacheError::DecodeError(format!("Failed to encode resource: {e}")))?;
    Ok(out.into_inner())
}
