//! Process-wide engine handle.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::errors::CacheResult;
use crate::domain::ports::AssetStorePort;

use super::engine::{ImageEngine, ImageEngineConfig};

static ENGINE: OnceCell<Arc<ImageEngine>> = OnceCell::const_new();

/// Initializes the shared engine once per process.
///
/// Later calls return the engine built by the first successful call and
/// ignore their arguments. A failed initialization can be retried.
///
/// # Errors
/// Returns error if the engine cannot be created.
pub async fn init_global(
    config: ImageEngineConfig,
    assets: Arc<dyn AssetStorePort>,
) -> CacheResult<Arc<ImageEngine>> {
    if let Some(engine) = ENGINE.get() {
        debug!("Image engine already initialized");
        return Ok(Arc::clone(engine));
    }

    ENGINE
        .get_or_try_init(|| async move {
            info!(cache_dir = %config.cache_dir.display(), "Initializing image engine");
            ImageEngine::new(config, assets).await.map(Arc::new)
        })
        .await
        .cloned()
}
