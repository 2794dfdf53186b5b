//! Coordinated memory and disk cache invalidation.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::domain::entities::{ClearOutcome, ClearTarget};
use crate::domain::errors::{CacheError, CacheResult, ImageError};
use crate::domain::event::BlastedEvent;
use crate::domain::ports::{EventNotifierPort, ImageEnginePort, SchedulerPort};

/// Clears engine tiers on the execution contexts they require.
///
/// Memory is cleared on the primary context, disk on a fresh background
/// context. Clearing both runs memory first and only touches disk once memory
/// succeeded; nothing is rolled back.
#[derive(Clone)]
pub struct CacheClearer {
    engine: Arc<dyn ImageEnginePort>,
    scheduler: Arc<dyn SchedulerPort>,
    notifier: Arc<dyn EventNotifierPort>,
}

impl CacheClearer {
    /// Creates a clearer dispatching through `scheduler`.
    #[must_use]
    pub fn new(
        engine: Arc<dyn ImageEnginePort>,
        scheduler: Arc<dyn SchedulerPort>,
        notifier: Arc<dyn EventNotifierPort>,
    ) -> Self {
        Self {
            engine,
            scheduler,
            notifier,
        }
    }

    /// Clears the memory tier.
    ///
    /// # Errors
    /// Returns `ImageError::ClearMemory` if the engine fails.
    pub async fn clear_memory(&self) -> Result<(), ImageError> {
        self.clear(ClearTarget::Memory).await.into_result()
    }

    /// Clears the disk tier.
    ///
    /// # Errors
    /// Returns `ImageError::ClearDisk` if the engine fails.
    pub async fn clear_disk(&self) -> Result<(), ImageError> {
        self.clear(ClearTarget::Disk).await.into_result()
    }

    /// Clears memory, then disk.
    ///
    /// # Errors
    /// Returns the error of whichever stage failed first.
    pub async fn clear_all(&self) -> Result<(), ImageError> {
        self.clear(ClearTarget::All).await.into_result()
    }

    /// Runs the stages `target` names and reports each stage's result.
    pub async fn clear(&self, target: ClearTarget) -> ClearOutcome {
        match target {
            ClearTarget::Memory => ClearOutcome::memory(self.memory_stage().await),
            ClearTarget::Disk => ClearOutcome::disk(self.disk_stage().await),
            ClearTarget::All => {
                let memory = self.memory_stage().await;
                if memory.is_err() {
                    debug!("Memory clear failed, skipping disk clear");
                    return ClearOutcome::all(memory, None);
                }

                let disk = self.disk_stage().await;
                if disk.is_ok() {
                    info!("Cleared all image caches");
                    self.notifier.emit(&BlastedEvent::cleared_all());
                }
                ClearOutcome::all(memory, Some(disk))
            }
        }
    }

    async fn memory_stage(&self) -> CacheResult<()> {
        let (tx, rx) = oneshot::channel();
        let engine = Arc::clone(&self.engine);
        let notifier = Arc::clone(&self.notifier);

        self.scheduler.run_on_primary(Box::new(move || {
            let result = engine.clear_memory();
            match &result {
                Ok(()) => notifier.emit(&BlastedEvent::cleared_memory()),
                Err(e) => error!(error = %e, "Error clearing memory cache"),
            }
            let _ = tx.send(result);
        }));

        rx.await
            .unwrap_or_else(|_| Err(CacheError::interrupted("memory clear did not complete")))
    }

    async fn disk_stage(&self) -> CacheResult<()> {
        let (tx, rx) = oneshot::channel();
        let engine = Arc::clone(&self.engine);
        let notifier = Arc::clone(&self.notifier);

        self.scheduler.run_on_background(Box::new(move || {
            let result = engine.clear_disk();
            match &result {
                Ok(()) => notifier.emit(&BlastedEvent::cleared_disk()),
                Err(e) => error!(error = %e, "Error clearing disk cache"),
            }
            let _ = tx.send(result);
        }));

        rx.await
            .unwrap_or_else(|_| Err(CacheError::interrupted("disk clear did not complete")))
    }
}
