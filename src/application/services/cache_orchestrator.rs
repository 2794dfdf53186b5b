//! Drives the image engine and reports which tier served each request.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{CacheTier, EngineSource, FetchDescriptor, FetchTarget, LoadOutcome};
use crate::domain::errors::ImageError;
use crate::domain::event::BlastedEvent;
use crate::domain::ports::{EventNotifierPort, ImageEnginePort};

/// Submits descriptors to the engine in preload mode.
#[derive(Clone)]
pub struct CacheOrchestrator {
    engine: Arc<dyn ImageEnginePort>,
    notifier: Arc<dyn EventNotifierPort>,
}

impl CacheOrchestrator {
    /// Creates an orchestrator over `engine`.
    #[must_use]
    pub fn new(engine: Arc<dyn ImageEnginePort>, notifier: Arc<dyn EventNotifierPort>) -> Self {
        Self { engine, notifier }
    }

    /// Fetches and caches the descriptor's target, applying the memory-cache
    /// bypass, and classifies the tier that served it.
    ///
    /// # Errors
    /// Returns `ImageError::Load` when the engine fails to fetch or decode.
    pub async fn load_or_preload(
        &self,
        descriptor: FetchDescriptor,
        skip_memory_cache: bool,
    ) -> Result<LoadOutcome, ImageError> {
        let descriptor = descriptor.with_skip_memory_cache(skip_memory_cache);
        if skip_memory_cache {
            debug!("Skip memory cache");
        }

        let source = self.engine.preload(&descriptor).await.map_err(|e| {
            warn!(fetch_target = %descriptor.target(), error = %e, "Failed to cache image");
            ImageError::load(e)
        })?;

        let tier = classify(source, descriptor.target());
        let token = descriptor.target().token();
        debug!(tier = %tier, ?source, token = %token, "Image loaded");

        self.notifier
            .emit(&BlastedEvent::loaded(format!("({}) {token}", tier.tag())));

        Ok(LoadOutcome { tier, token })
    }
}

/// Maps the engine-reported source onto a reported tier.
///
/// A memory hit wins; otherwise local targets are always `Local`, since the
/// engine does not book asset reads as cache hits.
#[must_use]
pub fn classify(source: EngineSource, target: &FetchTarget) -> CacheTier {
    match (source, target) {
        (EngineSource::MemoryCache, _) => CacheTier::Memory,
        (_, FetchTarget::Local(_)) => CacheTier::Local,
        (EngineSource::DataDiskCache, _) => CacheTier::DiskData,
        (EngineSource::ResourceDiskCache, _) => CacheTier::DiskResource,
        (EngineSource::Local | EngineSource::Remote, _) => CacheTier::Network,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Headers;
    use crate::domain::errors::CacheError;
    use crate::domain::event::EventKind;
    use crate::domain::ports::mocks::{RecordingNotifier, ScriptedEngine};
    use test_case::test_case;

    const URL: &str = "https://cdn.example.com/media/img.png";

    fn remote() -> FetchTarget {
        FetchTarget::remote(URL, Headers::new())
    }

    fn local() -> FetchTarget {
        FetchTarget::local("blasted-image/img.png")
    }

    #[test_case(EngineSource::MemoryCache, remote(), CacheTier::Memory ; "remote_memory")]
    #[test_case(EngineSource::DataDiskCache, remote(), CacheTier::DiskData ; "remote_data_disk")]
    #[test_case(EngineSource::ResourceDiskCache, remote(), CacheTier::DiskResource ; "remote_resource_disk")]
    #[test_case(EngineSource::Remote, remote(), CacheTier::Network ; "remote_network")]
    #[test_case(EngineSource::MemoryCache, local(), CacheTier::Memory ; "local_memory")]
    #[test_case(EngineSource::DataDiskCache, local(), CacheTier::Local ; "local_data_disk")]
    #[test_case(EngineSource::ResourceDiskCache, local(), CacheTier::Local ; "local_resource_disk")]
    #[test_case(EngineSource::Local, local(), CacheTier::Local ; "local_asset")]
    fn test_classify(source: EngineSource, target: FetchTarget, expected: CacheTier) {
        assert_eq!(classify(source, &target), expected);
    }

    fn orchestrator(engine: ScriptedEngine) -> (CacheOrchestrator, Arc<ScriptedEngine>, Arc<RecordingNotifier>) {
        let engine = Arc::new(engine);
        let notifier = Arc::new(RecordingNotifier::new());
        (
            CacheOrchestrator::new(engine.clone(), notifier.clone()),
            engine,
            notifier,
        )
    }

    #[tokio::test]
    async fn test_network_load_notifies_once() {
        let (orchestrator, engine, notifier) = orchestrator(ScriptedEngine::new());

        let outcome = orchestrator
            .load_or_preload(FetchDescriptor::new(remote()), false)
            .await
            .unwrap();

        assert_eq!(outcome.tier, CacheTier::Network);
        assert_eq!(outcome.token, URL);
        assert_eq!(engine.preloads().len(), 1);
        assert_eq!(
            notifier.messages(EventKind::Loaded),
            vec![format!("[BlastedImage] (NETWORK) {URL}")]
        );
    }

    #[tokio::test]
    async fn test_local_target_overrides_disk_report() {
        let (orchestrator, _, notifier) =
            orchestrator(ScriptedEngine::reporting(EngineSource::ResourceDiskCache));

        let outcome = orchestrator
            .load_or_preload(FetchDescriptor::new(local()), false)
            .await
            .unwrap();

        assert_eq!(outcome.tier, CacheTier::Local);
        assert_eq!(
            notifier.messages(EventKind::Loaded),
            vec!["[BlastedImage] (LOCAL) asset:///blasted-image/img.png"]
        );
    }

    #[tokio::test]
    async fn test_skip_memory_cache_is_applied() {
        let (orchestrator, engine, _) = orchestrator(ScriptedEngine::new());

        orchestrator
            .load_or_preload(FetchDescriptor::new(remote()), true)
            .await
            .unwrap();

        let submitted = engine.preloads();
        assert!(submitted[0].skip_memory_cache());
        assert_eq!(submitted[0].target(), &remote());
    }

    #[tokio::test]
    async fn test_engine_failure_rejects_without_notification() {
        let (orchestrator, engine, notifier) = orchestrator(ScriptedEngine::new());
        engine.fail_preload(CacheError::network("HTTP 404 Not Found"));

        let err = orchestrator
            .load_or_preload(FetchDescriptor::new(remote()), false)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "ERROR");
        assert_eq!(err.cause(), &CacheError::network("HTTP 404 Not Found"));
        assert_eq!(engine.preloads().len(), 1);
        assert!(notifier.events().is_empty());
    }
}
