//! Caller-facing image operations.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::application::dto::{LoadRequest, PreloadReport};
use crate::application::services::{CacheClearer, CacheOrchestrator, RequestBuilder};
use crate::domain::entities::{Headers, LoadOutcome};
use crate::domain::errors::ImageError;
use crate::domain::ports::{AssetStorePort, EventNotifierPort, ImageEnginePort, SchedulerPort};

/// Entry point used by a host: load, preload and clear.
///
/// Holds no state of its own beyond its collaborators; every call is
/// dispatched independently.
#[derive(Clone)]
pub struct BlastedImage {
    builder: RequestBuilder,
    orchestrator: CacheOrchestrator,
    clearer: CacheClearer,
    verbose: bool,
}

impl BlastedImage {
    /// Wires the facade over an engine and its collaborators.
    #[must_use]
    pub fn new(
        engine: Arc<dyn ImageEnginePort>,
        assets: Arc<dyn AssetStorePort>,
        scheduler: Arc<dyn SchedulerPort>,
        notifier: Arc<dyn EventNotifierPort>,
    ) -> Self {
        Self {
            builder: RequestBuilder::new(assets, Arc::clone(&notifier)),
            orchestrator: CacheOrchestrator::new(Arc::clone(&engine), Arc::clone(&notifier)),
            clearer: CacheClearer::new(engine, scheduler, notifier),
            verbose: true,
        }
    }

    /// Enables or disables diagnostic resolution events.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolves and preloads one image.
    ///
    /// # Errors
    /// Returns `ImageError::Load` (code `ERROR`) if the fetch fails.
    pub async fn load_image(&self, request: LoadRequest) -> Result<LoadOutcome, ImageError> {
        debug!(url = %request.url, "Loading image");
        let descriptor = self.builder.resolve(
            &request.url,
            request.headers.as_ref(),
            request.prefer_local_assets,
            request.cloud_prefix.as_deref(),
            self.verbose,
        );
        self.orchestrator
            .load_or_preload(descriptor, request.skip_memory_cache)
            .await
    }

    /// Loads a remote image with custom headers.
    ///
    /// # Errors
    /// Returns `ImageError::Load` if the fetch fails.
    pub async fn load_image_with_headers(
        &self,
        url: &str,
        headers: Headers,
        skip_memory_cache: bool,
    ) -> Result<LoadOutcome, ImageError> {
        self.load_image(
            LoadRequest::new(url)
                .with_headers(headers)
                .skip_memory_cache(skip_memory_cache),
        )
        .await
    }

    /// Loads an image, trying bundled assets under `cloud_prefix` first when
    /// `prefer_local_assets` is set.
    ///
    /// # Errors
    /// Returns `ImageError::Load` if the fetch fails.
    pub async fn load_image_hybrid(
        &self,
        url: &str,
        skip_memory_cache: bool,
        prefer_local_assets: bool,
        cloud_prefix: Option<&str>,
    ) -> Result<LoadOutcome, ImageError> {
        self.load_image(LoadRequest {
            url: url.to_string(),
            headers: None,
            skip_memory_cache,
            prefer_local_assets,
            cloud_prefix: cloud_prefix.map(str::to_string),
        })
        .await
    }

    /// Loads every request concurrently. Individual failures are logged and
    /// counted; the batch itself always completes.
    pub async fn preload(&self, requests: Vec<LoadRequest>) -> PreloadReport {
        let results = join_all(requests.into_iter().map(|request| async move {
            let url = request.url.clone();
            self.load_image(request).await.map_err(|e| (url, e))
        }))
        .await;

        let mut report = PreloadReport::default();
        for result in results {
            match result {
                Ok(_) => report.loaded += 1,
                Err((url, e)) => {
                    warn!(url = %url, error = %e, "Error preloading image");
                    report.failed += 1;
                }
            }
        }

        info!(loaded = report.loaded, failed = report.failed, "Preload finished");
        report
    }

    /// Clears the memory tier.
    ///
    /// # Errors
    /// Returns `ImageError::ClearMemory` (code `ERROR_CLEARING_MEMORY_CACHE`).
    pub async fn clear_memory_cache(&self) -> Result<(), ImageError> {
        self.clearer.clear_memory().await
    }

    /// Clears the disk tier.
    ///
    /// # Errors
    /// Returns `ImageError::ClearDisk` (code `ERROR_CLEARING_DISK_CACHE`).
    pub async fn clear_disk_cache(&self) -> Result<(), ImageError> {
        self.clearer.clear_disk().await
    }

    /// Clears memory, then disk.
    ///
    /// # Errors
    /// Returns the error of the first stage that failed.
    pub async fn clear_all_caches(&self) -> Result<(), ImageError> {
        self.clearer.clear_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CacheTier, EngineSource, FetchTarget};
    use crate::domain::errors::CacheError;
    use crate::domain::event::EventKind;
    use crate::domain::ports::mocks::{
        InMemoryAssets, InlineScheduler, RecordingNotifier, ScriptedEngine,
    };

    const PREFIX: &str = "https://cdn.example.com/media/";
    const URL: &str = "https://cdn.example.com/media/img.png?alt=media&token=x";

    fn facade(
        engine: ScriptedEngine,
        assets: InMemoryAssets,
    ) -> (BlastedImage, Arc<ScriptedEngine>, Arc<RecordingNotifier>) {
        let engine = Arc::new(engine);
        let notifier = Arc::new(RecordingNotifier::new());
        let facade = BlastedImage::new(
            engine.clone(),
            Arc::new(assets),
            Arc::new(InlineScheduler::new()),
            notifier.clone(),
        );
        (facade, engine, notifier)
    }

    #[tokio::test]
    async fn test_hybrid_load_uses_bundled_asset() {
        let (facade, engine, notifier) = facade(
            ScriptedEngine::reporting(EngineSource::Local),
            InMemoryAssets::with_paths(["blasted-image/img.png"]),
        );

        let outcome = facade
            .load_image_hybrid(URL, false, true, Some(PREFIX))
            .await
            .unwrap();

        assert_eq!(outcome.tier, CacheTier::Local);
        assert_eq!(
            engine.preloads()[0].target(),
            &FetchTarget::local("blasted-image/img.png")
        );
        assert_eq!(
            notifier.kinds(),
            vec![EventKind::Log, EventKind::Loaded]
        );
    }

    #[tokio::test]
    async fn test_headers_and_fallback_combine() {
        let (facade, engine, _) = facade(ScriptedEngine::new(), InMemoryAssets::new());
        let headers: Headers = [("Authorization", "Bearer t")].into_iter().collect();

        facade
            .load_image(
                LoadRequest::new(URL)
                    .with_headers(headers.clone())
                    .prefer_local_assets(PREFIX)
                    .skip_memory_cache(true),
            )
            .await
            .unwrap();

        let submitted = &engine.preloads()[0];
        assert_eq!(submitted.target(), &FetchTarget::remote(URL, headers));
        assert!(submitted.skip_memory_cache());
    }

    #[tokio::test]
    async fn test_quiet_facade_only_reports_loads() {
        let (facade, _, notifier) = facade(ScriptedEngine::new(), InMemoryAssets::new());
        let facade = facade.with_verbose(false);

        facade
            .load_image_with_headers(URL, Headers::new(), false)
            .await
            .unwrap();

        assert_eq!(notifier.kinds(), vec![EventKind::Loaded]);
    }

    #[tokio::test]
    async fn test_preload_counts_failures() {
        let (facade, engine, _) = facade(ScriptedEngine::new(), InMemoryAssets::new());
        engine.fail_preload(CacheError::network("unreachable"));

        let report = facade
            .preload(vec![LoadRequest::new(URL), LoadRequest::new(PREFIX)])
            .await;

        assert_eq!(report, PreloadReport { loaded: 0, failed: 2 });
        assert_eq!(engine.preloads().len(), 2);
    }

    #[tokio::test]
    async fn test_preload_empty_batch() {
        let (facade, _, _) = facade(ScriptedEngine::new(), InMemoryAssets::new());

        assert_eq!(facade.preload(Vec::new()).await.total(), 0);
    }

    #[tokio::test]
    async fn test_clear_operations_surface_codes() {
        let (facade, engine, _) = facade(ScriptedEngine::new(), InMemoryAssets::new());
        facade.clear_all_caches().await.unwrap();

        engine.fail_disk_clear(CacheError::io("denied"));
        let err = facade.clear_disk_cache().await.unwrap_err();
        assert_eq!(err.code(), ImageError::CLEAR_DISK_CODE);

        engine.fail_memory_clear(CacheError::io("locked"));
        let err = facade.clear_memory_cache().await.unwrap_err();
        assert_eq!(err.code(), ImageError::CLEAR_MEMORY_CODE);
    }
}
